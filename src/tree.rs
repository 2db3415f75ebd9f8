//! L-trees, full binary hash trees, authentication paths and root
//! reconstruction — generic over the combining function `H` and the node
//! type `T`, exactly like the reference's higher-order tree functions. This
//! lets the abstract tree-shape properties be exercised with plain integers
//! as `T`, with no hashing involved at all.

use alloc::vec::Vec;

use crate::bytes::ceil_log2;

/// The full sequence of layers produced by a tree reduction; `layers[0]` is
/// the leaves, `layers.last()` is the single-element root layer.
pub type Layers<T> = Vec<Vec<T>>;

/// Builds the layer sequence of an L-tree: pairs `(2j, 2j+1)` of the current
/// layer are combined via `h(left, right, layer_index)`; an unpaired
/// trailing node is promoted unchanged to the next layer. Terminates after
/// `ceil_log2(leaves.len())` reductions.
pub fn l_tree<T, H>(mut h: H, leaves: &[T]) -> Layers<T>
where
    T: Clone,
    H: FnMut(&T, &T, usize) -> T,
{
    let mut layers: Layers<T> = Vec::new();
    let mut layer = leaves.to_vec();
    layers.push(layer.clone());

    let reductions = ceil_log2(leaves.len().max(1));
    for i in 0..reductions {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut pairs = layer.chunks_exact(2);
        for pair in &mut pairs {
            next.push(h(&pair[0], &pair[1], i));
        }
        if let [lone] = pairs.remainder() {
            next.push(lone.clone());
        }
        layer = next;
        layers.push(layer.clone());
    }
    layers
}

/// As [`l_tree`], but requires a power-of-two leaf count — a full binary
/// hash tree is an L-tree that never has to promote a lone node.
pub fn hash_tree<T, H>(h: H, leaves: &[T]) -> Layers<T>
where
    T: Clone,
    H: FnMut(&T, &T, usize) -> T,
{
    debug_assert!(
        leaves.len().is_power_of_two(),
        "hash_tree requires a power-of-two leaf count"
    );
    l_tree(h, leaves)
}

/// The single element of the top layer.
pub fn root<T: Clone>(layers: &Layers<T>) -> T {
    layers
        .last()
        .expect("a tree has at least one layer")
        .first()
        .expect("the top layer has exactly one node")
        .clone()
}

/// The sibling of the node at `idx`, for each non-top layer, followed by
/// halving `idx`. Path length equals the tree height.
pub fn auth_path<T: Clone>(layers: &Layers<T>, mut idx: usize) -> Vec<T> {
    let mut path = Vec::with_capacity(layers.len().saturating_sub(1));
    for layer in &layers[..layers.len() - 1] {
        path.push(layer[idx ^ 1].clone());
        idx >>= 1;
    }
    path
}

/// Folds `path` onto `leaf`: at step `k`, if `idx` is even the node goes on
/// the left (`h(node, path[k], k)`), otherwise on the right. Equals the tree
/// root iff `(leaf, path)` was produced at position `idx`.
pub fn construct_root<T, H>(mut h: H, path: &[T], leaf: T, mut idx: usize) -> T
where
    T: Clone,
    H: FnMut(&T, &T, usize) -> T,
{
    let mut node = leaf;
    for (k, neighbor) in path.iter().enumerate() {
        node = if idx & 1 == 0 {
            h(&node, neighbor, k)
        } else {
            h(neighbor, &node, k)
        };
        idx >>= 1;
    }
    node
}
