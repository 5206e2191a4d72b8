//! # text_huffman
//!
//! Static two-pass Huffman coding: count symbol frequencies, build the merge
//! tree, derive a prefix code, encode, and persist the code table together
//! with the packed bits in a small self-describing container.
//!
//! ## Quick Start
//!
//! ```rust
//! use text_huffman::{HuffmanCodec, HuffmanConfig};
//!
//! let text = "abracadabra";
//! let codec = HuffmanCodec::from_text(text, HuffmanConfig::default())?;
//!
//! let bytes = codec.compress_text(text)?;
//! let decoded = HuffmanCodec::decompress_text(&bytes, &HuffmanConfig::default())?;
//! assert_eq!(decoded, text);
//! # Ok::<(), text_huffman::HuffmanError>(())
//! ```

use std::fmt::Debug;
use std::hash::Hash;

pub mod bit_vec;
pub mod bitstream;
pub mod code_table;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;

mod min_heap;

pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use config::HuffmanConfig;
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};

/// Anything usable as an alphabet symbol.
pub trait Symbol: Copy + Eq + Hash + Ord + Debug {}

impl<T: Copy + Eq + Hash + Ord + Debug> Symbol for T {}
