use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bit_vec::BitVec;
use crate::bitstream;
use crate::code_table::CodeTable;
use crate::config::HuffmanConfig;
use crate::container::Container;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::Symbol;

/// Encoder/decoder bound to one code table.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S: Symbol = char> {
    table: CodeTable<S>,
    config: HuffmanConfig,
}

impl<S: Symbol> HuffmanCodec<S> {
    pub fn new(tree: &HuffmanTree<S>) -> Self {
        Self::from_table(CodeTable::from_tree(tree))
    }

    pub fn from_table(table: CodeTable<S>) -> Self {
        HuffmanCodec {
            table,
            config: HuffmanConfig::default(),
        }
    }

    /// Analyses `symbols` and derives their code.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let frequencies = FrequencyTable::from_symbols(symbols)?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        debug!(
            "codec built from {} symbols ({} distinct)",
            frequencies.total(),
            frequencies.len()
        );
        Ok(Self::new(&tree))
    }

    pub fn with_config(mut self, config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    pub fn encode<I>(&self, symbols: I) -> Result<BitVec>
    where
        I: IntoIterator<Item = S>,
    {
        bitstream::encode(&self.table, symbols)
    }

    pub fn decode(&self, bits: &BitVec) -> Result<Vec<S>> {
        bitstream::decode(&self.table, bits)
    }
}

impl<S: Symbol + Serialize> HuffmanCodec<S> {
    /// Encodes `symbols` and packs them with this codec's table.
    pub fn compress<I>(&self, symbols: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
    {
        let payload = self.encode(symbols)?;
        Container {
            table: self.table.clone(),
            payload,
        }
        .to_bytes()
    }
}

impl<S: Symbol + DeserializeOwned> HuffmanCodec<S> {
    /// Decodes a container using the table stored inside it.
    pub fn decompress(bytes: &[u8], config: &HuffmanConfig) -> Result<Vec<S>> {
        let container = Container::<S>::from_bytes_with_limit(bytes, config.max_code_table_bytes)?;
        bitstream::decode(&container.table, &container.payload)
    }
}

impl HuffmanCodec<char> {
    /// Analyses `text` after applying `config`'s filtering.
    pub fn from_text(text: &str, config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        let codec = Self::from_symbols(config.preprocess(text))?;
        Ok(HuffmanCodec { config, ..codec })
    }

    /// Builds a codec from a UTF-8 corpus file.
    pub fn from_file<P: AsRef<Path>>(path: P, config: HuffmanConfig) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text, config)
    }

    pub fn encode_text(&self, text: &str) -> Result<BitVec> {
        self.encode(self.config.preprocess(text))
    }

    pub fn decode_text(&self, bits: &BitVec) -> Result<String> {
        Ok(self.decode(bits)?.into_iter().collect())
    }

    pub fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        self.compress(self.config.preprocess(text))
    }

    pub fn decompress_text(bytes: &[u8], config: &HuffmanConfig) -> Result<String> {
        Ok(Self::decompress(bytes, config)?.into_iter().collect())
    }

    /// Encodes the text file at `src` into a container at `dst`.
    ///
    /// The container is fully built before `dst` is created.
    pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q) -> Result<()> {
        let text = fs::read_to_string(src)?;
        let container = Container {
            table: self.table.clone(),
            payload: self.encode_text(&text)?,
        };
        let bytes = container.to_bytes()?;
        fs::write(dst, bytes)?;
        Ok(())
    }

    /// Decodes the container at `src` and writes the text to `dst`.
    pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
        src: P,
        dst: Q,
        config: &HuffmanConfig,
    ) -> Result<()> {
        let text = Self::decompress_text(&fs::read(src)?, config)?;
        let mut writer = BufWriter::new(File::create(dst)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
