//! Symbol sequence <-> bit sequence under a [`CodeTable`].

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::Symbol;

/// Appends code words one symbol at a time.
pub struct BitStreamEncoder<'a, S: Symbol> {
    table: &'a CodeTable<S>,
    output: BitVec,
}

impl<'a, S: Symbol> BitStreamEncoder<'a, S> {
    pub fn new(table: &'a CodeTable<S>) -> Self {
        BitStreamEncoder {
            table,
            output: BitVec::new(),
        }
    }

    pub fn push(&mut self, symbol: S) -> Result<()> {
        let code = self
            .table
            .code(&symbol)
            .ok_or_else(|| HuffmanError::UnknownSymbol {
                symbol: format!("{symbol:?}"),
            })?;
        self.output.extend_from_bitvec(code);
        Ok(())
    }

    /// Bits written so far.
    pub fn bit_count(&self) -> usize {
        self.output.len()
    }

    pub fn finish(self) -> BitVec {
        self.output
    }
}

pub fn encode<S, I>(table: &CodeTable<S>, symbols: I) -> Result<BitVec>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let mut encoder = BitStreamEncoder::new(table);
    for symbol in symbols {
        encoder.push(symbol)?;
    }
    Ok(encoder.finish())
}

/// Reads bits into an accumulator and emits a symbol as soon as the
/// accumulator equals a code word. Prefix-freedom makes the first match the
/// only possible one.
pub fn decode<S: Symbol>(table: &CodeTable<S>, bits: &BitVec) -> Result<Vec<S>> {
    let mut output = Vec::new();
    let mut pending = BitVec::with_capacity(table.max_code_len());
    let mut start = 0;

    for (offset, bit) in bits.iter().enumerate() {
        pending.push_bit(bit);
        if let Some(symbol) = table.symbol(&pending) {
            output.push(symbol);
            pending.clear();
            start = offset + 1;
        } else if pending.len() >= table.max_code_len() {
            return Err(HuffmanError::UnmatchedCode { offset: start });
        }
    }

    if !pending.is_empty() {
        return Err(HuffmanError::TruncatedStream {
            pending_bits: pending.len(),
        });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::hufftree::HuffmanTree;

    fn table_for(text: &str) -> CodeTable<char> {
        let freq = FrequencyTable::from_text(text).unwrap();
        CodeTable::from_tree(&HuffmanTree::from_frequencies(&freq).unwrap())
    }

    #[test]
    fn aaabb_encodes_to_five_bits() {
        let table = table_for("aaabb");
        let bits = encode(&table, "aaabb".chars()).unwrap();
        assert_eq!(bits.to_string(), "11100");
        assert_eq!(decode(&table, &bits).unwrap(), "aaabb".chars().collect::<Vec<_>>());
    }

    #[test]
    fn single_symbol_encodes_to_zeros() {
        let table = table_for("kkkkkkkkkkk");
        let bits = encode(&table, "kkkkkkkkkkk".chars()).unwrap();
        assert_eq!(bits.len(), 11);
        assert!(bits.iter().all(|b| !b));
        assert_eq!(decode(&table, &bits).unwrap().len(), 11);
    }

    #[test]
    fn streaming_matches_batch() {
        let text = "mississippi river";
        let table = table_for(text);
        let mut encoder = BitStreamEncoder::new(&table);
        for c in text.chars() {
            encoder.push(c).unwrap();
        }
        assert!(encoder.bit_count() > 0);
        assert_eq!(encoder.finish(), encode(&table, text.chars()).unwrap());
    }

    #[test]
    fn unknown_symbol_fails() {
        let table = table_for("abc");
        let err = encode(&table, "abd".chars()).unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownSymbol { .. }));
    }

    #[test]
    fn truncated_stream_fails() {
        let table = table_for("abcdefgh");
        let mut bits = encode(&table, "abc".chars()).unwrap();
        let cut: BitVec = bits.iter().take(bits.len() - 1).collect();
        bits = cut;
        let err = decode(&table, &bits).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedStream { pending_bits } if pending_bits > 0));
    }

    #[test]
    fn dead_branch_fails_at_its_offset() {
        let table = table_for("j");
        let bits: BitVec = "001".parse().unwrap();
        let err = decode(&table, &bits).unwrap_err();
        assert!(matches!(err, HuffmanError::UnmatchedCode { offset: 2 }));
    }

    #[test]
    fn empty_bits_decode_to_nothing() {
        let table = table_for("xyz");
        assert!(decode(&table, &BitVec::new()).unwrap().is_empty());
    }
}
