use crate::{
    binary::{
        empty_sum,
        Node,
    },
    common::Bytes32,
};

use crate::alloc::borrow::ToOwned;
use alloc::vec::Vec;

#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleRootCalculator {
    stack: Vec<Node>,
}

impl MerkleRootCalculator {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn new_with_stack(stack: Vec<Node>) -> Self {
        Self { stack }
    }

    pub fn push(&mut self, data: &[u8]) {
        let node = Node::create_leaf(0, data);
        self.stack.push(node);

        while self.stack.len() > 1 {
            let right_node = &self.stack[self.stack.len() - 1];
            let left_node = &self.stack[self.stack.len() - 2];
            if right_node.height() == left_node.height() {
                let merged_node = Node::create_node(left_node, right_node);
                self.stack.pop();
                self.stack.pop();
                self.stack.push(merged_node);
            } else {
                break
            }
        }
    }

    pub fn root(mut self) -> Bytes32 {
        if self.stack.is_empty() {
            return empty_sum().to_owned()
        }
        while self.stack.len() > 1 {
            let right_child = self.stack.pop().expect("Unable to pop element from stack");
            let left_child = self.stack.pop().expect("Unable to pop element from stack");
            let merged_node = Node::create_node(&left_child, &right_child);
            self.stack.push(merged_node);
        }
        self.stack.pop().unwrap().hash().to_owned()
    }

    pub fn root_from_iterator<I: Iterator<Item = T>, T: AsRef<[u8]>>(
        self,
        iterator: I,
    ) -> Bytes32 {
        let mut calculator = MerkleRootCalculator::new();

        for data in iterator {
            calculator.push(data.as_ref());
        }

        calculator.root()
    }

    pub fn stack(&self) -> &Vec<Node> {
        &self.stack
    }
}
