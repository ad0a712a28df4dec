#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Sentence is not framed as `$<address>,<fields>[*<checksum>]\r\n`.
    #[error("invalid framing: {0}")]
    Framing(String),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Checksum {
        /// Checksum computed from the sentence body
        expected: String,
        /// Checksum claimed by the sentence, or empty if it had none
        actual: String,
    },

    #[error("wrong topic: expected {expected}, got {actual}")]
    TopicMismatch {
        expected: &'static str,
        actual: String,
    },

    /// The sentence is well formed but reports a void or unusable fix.
    #[error("invalid fix: {0}")]
    InvalidFix(&'static str),

    #[error("not enough fields: got {actual}, need at least {minimum}")]
    FieldCount {
        /// Number of fields we got
        actual: usize,
        /// Minimum number of fields required by the topic layout
        minimum: usize,
    },

    #[error("invalid value {value:?} for field {index}")]
    InvalidField { index: usize, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
