use crate::{
    binary::{
        self,
        empty_sum,
        Node,
        Primitive,
    },
    common::{
        Bytes32,
        ProofSet,
        StorageMap,
    },
    storage::Mappable,
};

use crate::alloc::borrow::ToOwned;
use alloc::vec::Vec;

/// The table of the Binary Merkle Tree's nodes. [`MerkleTree`] works with it as
/// a binary array, where the storage key of the node is the `u64` index and
/// value is the [`Node`](crate::binary::Node).
#[derive(Debug, Clone)]
pub struct NodesTable;

impl Mappable for NodesTable {
    type Key = Self::OwnedKey;
    type OwnedKey = u64;
    type OwnedValue = Primitive;
    type Value = Self::OwnedValue;
}

type Storage = StorageMap<NodesTable>;
type BinaryMerkleTree = binary::MerkleTree<NodesTable, Storage>;

#[derive(Debug, Clone)]
pub struct MerkleTree {
    tree: BinaryMerkleTree,
}

impl MerkleTree {
    pub fn new() -> Self {
        Self {
            tree: BinaryMerkleTree::new(Storage::new()),
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        let _ = self.tree.push(data);
    }

    pub fn root(&self) -> Bytes32 {
        self.tree.root()
    }

    pub fn prove(&self, proof_index: u64) -> Option<(Bytes32, ProofSet)> {
        self.tree.prove(proof_index).ok()
    }

    pub fn reset(&mut self) {
        self.tree.reset();
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct MerkleRootCalculator {
    stack: Vec<Node>,
}

impl MerkleRootCalculator {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, data: &[u8]) {
        let node = Node::create_leaf(0, data);
        self.stack.push(node);

        while let Some(top_node) = self.stack.last() {
            if self.stack.len() > 1 {
                if let Some(second_top_node) = self.stack.get(self.stack.len() - 2) {
                    if top_node.height() == second_top_node.height() {
                        let merged_node = Node::create_node(second_top_node, top_node);
                        self.stack.pop();
                        self.stack.pop();
                        self.stack.push(merged_node);
                    } else {
                        break
                    }
                }
            } else {
                break
            }
        }
    }

    pub fn root(&mut self) -> Bytes32 {
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
}
