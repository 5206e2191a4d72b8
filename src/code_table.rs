use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::Symbol;

/// Bijective symbol <-> code word mapping forming a prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol = char> {
    codes: BTreeMap<S, BitVec>,
    inverse: HashMap<BitVec, S>,
    max_code_len: usize,
}

impl<S: Symbol> CodeTable<S> {
    /// Walks the tree appending 0 on every left branch and 1 on every right
    /// branch. A tree that is a single leaf gets the code "0".
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = BTreeMap::new();
        match &tree.root {
            HuffNode::Leaf { symbol, .. } => {
                let mut code = BitVec::new();
                code.push_bit(false);
                codes.insert(*symbol, code);
            }
            root => {
                let mut stack = vec![(root, BitVec::new())];
                while let Some((node, prefix)) = stack.pop() {
                    match node {
                        HuffNode::Leaf { symbol, .. } => {
                            codes.insert(*symbol, prefix);
                        }
                        HuffNode::Internal { left, right, .. } => {
                            let mut right_code = prefix.clone();
                            right_code.push_bit(true);
                            let mut left_code = prefix;
                            left_code.push_bit(false);
                            stack.push((&**right, right_code));
                            stack.push((&**left, left_code));
                        }
                    }
                }
            }
        }
        Self::from_map_unchecked(codes)
    }

    /// Builds a table from explicit code words, checking that they form a
    /// prefix code.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, BitVec)>,
    {
        let mut map = BTreeMap::new();
        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(HuffmanError::invalid_table(format!(
                    "empty code word for {symbol:?}"
                )));
            }
            if map.insert(symbol, code).is_some() {
                return Err(HuffmanError::invalid_table(format!(
                    "symbol {symbol:?} listed twice"
                )));
            }
        }
        if map.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }

        // In lexicographic order a code word that prefixes another also
        // prefixes its immediate successor.
        let mut sorted: Vec<(String, &S)> = map.iter().map(|(s, c)| (c.to_string(), s)).collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            let (a, sa) = &pair[0];
            let (b, sb) = &pair[1];
            if b.starts_with(a.as_str()) {
                return Err(HuffmanError::invalid_table(format!(
                    "code {a} of {sa:?} is a prefix of code {b} of {sb:?}"
                )));
            }
        }

        Ok(Self::from_map_unchecked(map))
    }

    fn from_map_unchecked(codes: BTreeMap<S, BitVec>) -> Self {
        let inverse = codes.iter().map(|(s, c)| (c.clone(), *s)).collect();
        let max_code_len = codes.values().map(BitVec::len).max().unwrap_or(0);
        CodeTable {
            codes,
            inverse,
            max_code_len,
        }
    }

    pub fn code(&self, symbol: &S) -> Option<&BitVec> {
        self.codes.get(symbol)
    }

    pub fn symbol(&self, code: &BitVec) -> Option<S> {
        self.inverse.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitVec)> {
        self.codes.iter()
    }
}

impl<S: Symbol + Serialize> CodeTable<S> {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl<S: Symbol + DeserializeOwned> CodeTable<S> {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl<S: Symbol + Serialize> Serialize for CodeTable<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.codes.iter().map(|(s, c)| (s, c.to_string())))
    }
}

impl<'de, S: Symbol + Deserialize<'de>> Deserialize<'de> for CodeTable<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<S, String>::deserialize(deserializer)?;
        let mut codes = Vec::with_capacity(raw.len());
        for (symbol, bits) in raw {
            let code = bits.parse::<BitVec>().map_err(serde::de::Error::custom)?;
            codes.push((symbol, code));
        }
        CodeTable::from_codes(codes).map_err(serde::de::Error::custom)
    }
}
