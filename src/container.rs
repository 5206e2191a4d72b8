//! Persisted layout, all lengths big-endian:
//!
//! ```text
//! "HUF1" | table_len: u32 | table JSON | bit_len: u32 | payload, MSB first, zero padded
//! ```

use std::io::{Read, Write};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::config::DEFAULT_MAX_CODE_TABLE_BYTES;
use crate::error::{HuffmanError, Result};
use crate::Symbol;

pub const MAGIC: [u8; 4] = *b"HUF1";

/// Header bytes before the table plus the bit length field.
const FIXED_OVERHEAD: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<S: Symbol = char> {
    pub table: CodeTable<S>,
    pub payload: BitVec,
}

impl<S: Symbol + Serialize> Container<S> {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let table_json = self.table.to_json()?;
        let table_len = u32::try_from(table_json.len()).map_err(|_| {
            HuffmanError::format(format!(
                "code table of {} bytes does not fit a u32 length",
                table_json.len()
            ))
        })?;
        let bit_len = u32::try_from(self.payload.len()).map_err(|_| {
            HuffmanError::format(format!(
                "payload of {} bits does not fit a u32 length",
                self.payload.len()
            ))
        })?;

        let mut bytes =
            Vec::with_capacity(FIXED_OVERHEAD + table_json.len() + self.payload.as_bytes().len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&table_len.to_be_bytes());
        bytes.extend_from_slice(&table_json);
        bytes.extend_from_slice(&bit_len.to_be_bytes());
        bytes.extend_from_slice(self.payload.as_bytes());

        debug!(
            "wrote container: {} table bytes, {} payload bits, {} bytes total",
            table_len,
            bit_len,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Serializes fully before touching `writer`, so a failed encode leaves
    /// nothing behind.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

impl<S: Symbol + DeserializeOwned> Container<S> {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limit(bytes, DEFAULT_MAX_CODE_TABLE_BYTES)
    }

    pub fn from_bytes_with_limit(bytes: &[u8], max_table_bytes: u32) -> Result<Self> {
        let mut input = bytes;

        let magic = take(&mut input, MAGIC.len(), "magic")?;
        if magic != MAGIC {
            return Err(HuffmanError::format(format!("bad magic {magic:02x?}")));
        }

        let table_len = read_u32(&mut input, "table length")?;
        if table_len > max_table_bytes {
            return Err(HuffmanError::format(format!(
                "code table of {table_len} bytes exceeds the {max_table_bytes} byte limit"
            )));
        }
        let table_json = take(&mut input, table_len as usize, "code table")?;
        let table = CodeTable::from_json(table_json).map_err(|e| match e {
            HuffmanError::Json(e) => HuffmanError::format(format!("unreadable code table: {e}")),
            other => other,
        })?;

        let bit_len = read_u32(&mut input, "payload bit length")? as usize;
        let expected = bit_len.div_ceil(8);
        if input.len() != expected {
            return Err(HuffmanError::format(format!(
                "payload of {bit_len} bits needs {expected} bytes, found {}",
                input.len()
            )));
        }
        let payload = BitVec::from_packed(input, bit_len)
            .ok_or_else(|| HuffmanError::format("payload shorter than its bit length"))?;

        debug!(
            "read container: {} symbols, {} payload bits",
            table.len(),
            bit_len
        );
        Ok(Container { table, payload })
    }

    pub fn read_from<R: Read>(reader: &mut R, max_table_bytes: u32) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes_with_limit(&bytes, max_table_bytes)
    }
}

fn take<'a>(input: &mut &'a [u8], len: usize, what: &str) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(HuffmanError::format(format!(
            "truncated {what}: need {len} bytes, have {}",
            input.len()
        )));
    }
    let (head, rest) = input.split_at(len);
    *input = rest;
    Ok(head)
}

fn read_u32(input: &mut &[u8], what: &str) -> Result<u32> {
    let raw = take(input, 4, what)?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(raw);
    Ok(u32::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hufftree::HuffmanTree;

    fn sample() -> Container<char> {
        let tree = HuffmanTree::build(vec![('a', 3), ('b', 2)]).unwrap();
        Container {
            table: CodeTable::from_tree(&tree),
            payload: "11100".parse().unwrap(),
        }
    }

    #[test]
    fn exact_layout() {
        let bytes = sample().to_bytes().unwrap();
        let json = br#"{"a":"1","b":"0"}"#;
        let mut expected = Vec::new();
        expected.extend_from_slice(b"HUF1");
        expected.extend_from_slice(&(json.len() as u32).to_be_bytes());
        expected.extend_from_slice(json);
        expected.extend_from_slice(&[0, 0, 0, 5]);
        expected.push(0b1110_0000);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn round_trip_keeps_exact_bit_length() {
        let container = sample();
        let restored = Container::<char>::from_bytes(&container.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, container);
        assert_eq!(restored.payload.len(), 5);
    }

    #[test]
    fn empty_payload_round_trips() {
        let mut container = sample();
        container.payload = BitVec::new();
        let bytes = container.to_bytes().unwrap();
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
        assert_eq!(Container::<char>::from_bytes(&bytes).unwrap(), container);
    }

    #[test]
    fn bad_magic() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[0] = b'X';
        let err = Container::<char>::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, HuffmanError::Format(_)));
    }

    #[test]
    fn every_truncation_is_a_format_error() {
        let bytes = sample().to_bytes().unwrap();
        for cut in 0..bytes.len() {
            let err = Container::<char>::from_bytes(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, HuffmanError::Format(_)), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn oversized_length_fields() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            Container::<char>::from_bytes_with_limit(&bytes, u32::MAX).unwrap_err(),
            HuffmanError::Format(_)
        ));

        let mut bytes = sample().to_bytes().unwrap();
        let n = bytes.len();
        bytes[n - 5..n - 1].copy_from_slice(&9u32.to_be_bytes());
        assert!(matches!(
            Container::<char>::from_bytes(&bytes).unwrap_err(),
            HuffmanError::Format(_)
        ));
    }

    #[test]
    fn table_limit_is_enforced() {
        let bytes = sample().to_bytes().unwrap();
        let err = Container::<char>::from_bytes_with_limit(&bytes, 4).unwrap_err();
        assert!(matches!(err, HuffmanError::Format(_)));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes.push(0);
        assert!(Container::<char>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn garbage_table_is_a_format_error() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"HUF1");
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.extend_from_slice(b"{{{");
        bytes.extend_from_slice(&0u32.to_be_bytes());
        let err = Container::<char>::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, HuffmanError::Format(_)));
    }

    #[test]
    fn padding_bits_are_ignored_on_read() {
        let mut bytes = sample().to_bytes().unwrap();
        let n = bytes.len();
        bytes[n - 1] |= 0b0000_0111;
        let restored = Container::<char>::from_bytes(&bytes).unwrap();
        assert_eq!(restored.payload.to_string(), "11100");
    }

    #[test]
    fn writer_and_reader() {
        let container = sample();
        let mut sink = Vec::new();
        container.write_to(&mut sink).unwrap();
        let restored = Container::<char>::read_from(&mut sink.as_slice(), 1024).unwrap();
        assert_eq!(restored, container);
    }
}
