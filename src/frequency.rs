use std::collections::HashMap;

use crate::error::{HuffmanError, Result};
use crate::Symbol;

/// Occurrence counts per symbol, kept in first-seen order.
///
/// The order matters: the tree builder numbers leaves in iteration order, so
/// two tables counted from the same sequence always produce the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol = char> {
    entries: Vec<(S, u64)>,
    index: HashMap<S, usize>,
    total: u64,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Counts every symbol of `symbols`. Fails on an empty sequence.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let mut table = FrequencyTable {
            entries: Vec::new(),
            index: HashMap::new(),
            total: 0,
        };
        for symbol in symbols {
            table.add(symbol, 1);
        }
        if table.entries.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }
        Ok(table)
    }

    fn add(&mut self, symbol: S, count: u64) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
        self.total += count;
    }

    /// Adds `other`'s counts into `self`. Symbols not yet seen are appended
    /// in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyTable<S>) {
        for &(symbol, count) in &other.entries {
            self.add(symbol, count);
        }
    }

    pub fn count(&self, symbol: &S) -> u64 {
        self.index.get(symbol).map_or(0, |&i| self.entries[i].1)
    }

    /// Share of `symbol` among all counted symbols, 0.0 if never seen.
    pub fn probability(&self, symbol: &S) -> f64 {
        self.count(symbol) as f64 / self.total as f64
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn weights(&self) -> &[(S, u64)] {
        &self.entries
    }
}

impl FrequencyTable<char> {
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_symbols(text.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_seen_order() {
        let table = FrequencyTable::from_text("abracadabra").unwrap();
        let weights: Vec<_> = table.iter().collect();
        assert_eq!(weights, vec![('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]);
        assert_eq!(table.total(), 11);
        assert_eq!(table.len(), 5);
        assert_eq!(table.count(&'z'), 0);
        assert!((table.probability(&'a') - 5.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = FrequencyTable::<u8>::from_symbols(Vec::new()).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyAlphabet));
    }

    #[test]
    fn merge_matches_single_pass_count() {
        let text = "the quick brown fox jumps over the lazy dog";
        let (head, tail) = text.split_at(17);
        let mut merged = FrequencyTable::from_text(head).unwrap();
        merged.merge(&FrequencyTable::from_text(tail).unwrap());

        let whole = FrequencyTable::from_text(text).unwrap();
        assert_eq!(merged.total(), whole.total());
        for (symbol, count) in whole.iter() {
            assert_eq!(merged.count(&symbol), count);
        }
        assert_eq!(merged, whole);
    }

    #[test]
    fn byte_symbols() {
        let table = FrequencyTable::from_symbols(b"\x00\xff\x00".iter().copied()).unwrap();
        assert_eq!(table.weights(), &[(0u8, 2), (255u8, 1)]);
    }
}
