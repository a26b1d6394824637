//! Error types for Schnorr proofs.

/// Main error types for the library.
///
/// Variants fall into three classes: bad group parameters (fatal at
/// construction), API misuse by the caller (fatal to the call), and
/// malformed untrusted input (reject the proof and continue, see
/// [`Error::is_untrusted_input`]). A proof that is well-formed but false is
/// not an error: verification returns `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid group parameters were provided.
    #[error("Invalid group parameters: {0}")]
    InvalidGroup(String),

    /// The witness is out of range or does not match the statement.
    #[error("Invalid witness: {0}")]
    InvalidWitness(String),

    /// A session method was called in the wrong state.
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// The prover already responded; its nonce cannot be used again.
    #[error("Prover session already finalized")]
    AlreadyFinalized,

    /// An externally supplied challenge is not in `[0, q)`.
    #[error("Challenge is not less than the group order")]
    InvalidChallenge,

    /// The public statement is not an element of the order-q subgroup.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// A proof field is outside its required range.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// The embedded challenge differs from the one derived from the transcript.
    #[error("Fiat-Shamir challenge mismatch")]
    ChallengeMismatch,

    /// Encoded input is shorter than the wire format requires.
    #[error("Truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Required length in bytes.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Encoded input is longer than the wire format allows.
    #[error("Input has {0} trailing bytes")]
    TrailingBytes(usize),

    /// A decoded or encoded field does not fit its range.
    #[error("Field {0} out of range")]
    FieldOutOfRange(&'static str),

    /// Textual input is not valid hex.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A challenge was requested before anything was appended.
    #[error("Cannot derive a challenge from an empty transcript")]
    EmptyTranscript,

    /// The batch verifier is at capacity.
    #[error("Batch is full ({0} proofs)")]
    BatchFull(usize),

    /// Two transcripts cannot be combined into a witness.
    #[error("Witness extraction failed: {0}")]
    ExtractionFailed(String),

    /// A protocol message arrived out of order.
    #[error("Unexpected message: expected {expected}, got {actual}")]
    UnexpectedMessage {
        /// Message kind the session was waiting for.
        expected: &'static str,
        /// Message kind that arrived.
        actual: &'static str,
    },

    /// The underlying channel failed or closed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Group configuration could not be turned into parameters.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for errors caused by untrusted peer input.
    ///
    /// These are always recoverable: reject the proof or message and carry on.
    pub fn is_untrusted_input(&self) -> bool {
        matches!(
            self,
            Error::MalformedProof(_)
                | Error::ChallengeMismatch
                | Error::TruncatedInput { .. }
                | Error::TrailingBytes(_)
                | Error::FieldOutOfRange(_)
                | Error::InvalidEncoding(_)
                | Error::InvalidStatement(_)
                | Error::UnexpectedMessage { .. }
        )
    }
}

/// Result type alias using the library's error type.
pub type Result<T> = core::result::Result<T, Error>;
