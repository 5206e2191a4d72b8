use std::io;

/// Errors produced while analysing, encoding, decoding or persisting data.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// No symbols to build a code from.
    #[error("empty alphabet: at least one symbol is required")]
    EmptyAlphabet,

    /// The same symbol was supplied twice to the tree builder.
    #[error("duplicate symbol {symbol} in weight set")]
    DuplicateSymbol { symbol: String },

    /// Merged subtree weight does not fit in a u64.
    #[error("weight overflow while merging subtrees")]
    WeightOverflow,

    /// A symbol with no code word in the table.
    #[error("unknown symbol {symbol}: not present in the code table")]
    UnknownSymbol { symbol: String },

    /// Bits ran out in the middle of a code word.
    #[error("truncated stream: {pending_bits} trailing bits do not form a code word")]
    TruncatedStream { pending_bits: usize },

    /// The bits starting at `offset` match no code word in the table.
    #[error("unmatched code starting at bit {offset}")]
    UnmatchedCode { offset: usize },

    /// A code table that is not a valid prefix code.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// Malformed container bytes.
    #[error("format error: {0}")]
    Format(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HuffmanError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        HuffmanError::Format(message.into())
    }

    pub(crate) fn invalid_table(message: impl Into<String>) -> Self {
        HuffmanError::InvalidCodeTable(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
