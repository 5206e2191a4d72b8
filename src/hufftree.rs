use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;
use crate::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode<S> {
    Leaf {
        weight: u64,
        symbol: S,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode<S>>,
        right: Box<HuffNode<S>>,
    },
}

impl<S> HuffNode<S> {
    pub fn new(symbol: S, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Joins two subtrees; `a` becomes the left ("0") child.
    pub fn merge(a: Self, b: Self) -> Result<Self> {
        let weight = a
            .weight()
            .checked_add(b.weight())
            .ok_or(HuffmanError::WeightOverflow)?;
        Ok(HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        })
    }
}

/// A subtree waiting in the builder's queue, ordered by (weight, sequence).
struct Pending<S> {
    weight: u64,
    sequence: u64,
    node: HuffNode<S>,
}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl<S> Eq for Pending<S> {}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    pub root: HuffNode<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Builds the merge tree for `weights`.
    ///
    /// Leaves are numbered in the order given and every merged subtree gets
    /// the next number, so equal weights are always resolved the same way.
    /// The two lightest subtrees are merged until one remains; the first one
    /// taken off the queue becomes the left child.
    pub fn build<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut sequence: u64 = 0;
        let mut seen = HashSet::new();
        let mut leaves = Vec::new();
        for (symbol, weight) in weights {
            if !seen.insert(symbol) {
                return Err(HuffmanError::DuplicateSymbol {
                    symbol: format!("{symbol:?}"),
                });
            }
            leaves.push(Pending {
                weight,
                sequence,
                node: HuffNode::new(symbol, weight),
            });
            sequence += 1;
        }
        let leaf_count = leaves.len();

        let mut heap = MinHeap::build(leaves);
        let mut merges = 0usize;
        let root = loop {
            let first = heap.extract_min().ok_or(HuffmanError::EmptyAlphabet)?;
            let Some(second) = heap.extract_min() else {
                break first.node;
            };
            trace!(
                "merging weight {} (#{}) with weight {} (#{}) as #{}",
                first.weight,
                first.sequence,
                second.weight,
                second.sequence,
                sequence
            );
            let node = HuffNode::merge(first.node, second.node)?;
            heap.insert(Pending {
                weight: node.weight(),
                sequence,
                node,
            });
            sequence += 1;
            merges += 1;
        };

        debug!(
            "built huffman tree: {} leaves, {} merges, root weight {}",
            leaf_count,
            merges,
            root.weight()
        );
        Ok(HuffmanTree { root })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Self> {
        Self::build(frequencies.iter())
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => count += 1,
                HuffNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Depth of every leaf, which is its code length. A lone leaf counts as 1.
    pub fn code_lengths(&self) -> BTreeMap<S, usize> {
        let mut lengths = BTreeMap::new();
        if let HuffNode::Leaf { symbol, .. } = &self.root {
            lengths.insert(*symbol, 1);
            return lengths;
        }
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    lengths.insert(*symbol, depth);
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        lengths
    }
}
