use crate::binary::{
    Data,
    leaf_sum,
    node_sum,
};

pub fn verify<T: AsRef<[u8]>>(
    root: &Data,
    data: &T,
    proof_set: &[Data],
    proof_index: u64,
    num_leaves: u64,
) -> bool {
    let mut sum = leaf_sum(data.as_ref());

    if proof_index >= num_leaves {
        return false
    }

    if proof_set.is_empty() {
        return if num_leaves == 1 { *root == sum } else { false }
    }

    let mut height = 1usize;
    let mut stable_end = proof_index;

    loop {
        let subtree_start_index = proof_index / (1 << height) * (1 << height);
        let subtree_end_index = subtree_start_index + (1 << height) - 1;

        if subtree_end_index >= num_leaves {
            break
        }

        stable_end = subtree_end_index;

        if proof_set.len() < height {
            return false
        }

        let proof_data = proof_set[height - 1];
        if proof_index - subtree_start_index < 1 << (height - 1) {
            sum = node_sum(&sum, &proof_data);
        } else {
            sum = node_sum(&proof_data, &sum);
        }

        height += 1;
    }

    if stable_end != num_leaves - 1 {
        if proof_set.len() < height {
            return false
        }
        let proof_data = proof_set[height - 1];
        sum = node_sum(&sum, &proof_data);
        height += 1;
    }

    while height - 1 < proof_set.len() {
        let proof_data = proof_set[height - 1];
        sum = node_sum(&proof_data, &sum);
        height += 1;
    }

    sum == *root
}
