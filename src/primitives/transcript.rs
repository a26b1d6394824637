//! Fiat-Shamir transcript for non-interactive proofs.
//!
//! Every appended field is length-prefixed and labelled, so no two distinct
//! append sequences produce the same byte stream. Challenges are derived with
//! SHA-256.

use num_bigint::BigUint;
use num_traits::Zero;

use super::arith::{byte_len, expand_digest, to_fixed_be};
use super::{Commitment, GroupParameters, Statement};
use crate::{Error, Result};

/// Protocol label for transcript initialization.
const PROTOCOL_LABEL: &[u8] = b"schnorr-zkp v0.1.0";

/// Label for the domain separator written by [`Transcript::new`].
const DOMAIN_LABEL: &[u8] = b"domain";

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"challenge";

/// Number of extra bits for statistical security in challenge generation (128 bits).
const EXTRA_SECURITY_BITS: usize = 128;

/// Transcript accumulating the public values a challenge is bound to.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use schnorr_zkp::Transcript;
///
/// let q = BigUint::from(1019u32);
/// let mut transcript = Transcript::default();
/// transcript.append(b"statement", b"y");
/// let c = transcript.challenge(&q).unwrap();
/// assert!(c < q);
/// ```
#[derive(Clone, Debug)]
pub struct Transcript {
    buffer: Vec<u8>,
    appended: usize,
}

impl Transcript {
    /// Creates a transcript under an application-chosen domain separator.
    ///
    /// The separator is absorbed but does not count as an appended field.
    pub fn new(domain: &[u8]) -> Self {
        let mut buffer = Vec::new();
        write_field(&mut buffer, DOMAIN_LABEL, domain);
        Self {
            buffer,
            appended: 0,
        }
    }

    /// Appends a labelled value: `u32be(len(label)) || label || u32be(len(value)) || value`.
    pub fn append(&mut self, label: &[u8], value: &[u8]) {
        write_field(&mut self.buffer, label, value);
        self.appended += 1;
    }

    /// Appends application-specific context to prevent cross-protocol attacks.
    ///
    /// # Security
    ///
    /// This should be called before generating proofs in application-specific
    /// contexts to ensure proofs from one context cannot be replayed in another.
    /// Examples: session ID, verifier nonce, purpose string.
    pub fn append_context(&mut self, context: &[u8]) {
        self.append(b"context", context);
    }

    /// Appends the group description `(p, q, g)`.
    pub fn append_parameters(&mut self, params: &GroupParameters) {
        let width = params.element_len();
        self.append(b"p", &encode(params.p(), width));
        self.append(b"q", &encode(params.q(), params.scalar_len()));
        self.append(b"g", &encode(params.g(), width));
    }

    /// Appends the public statement `y`.
    pub fn append_statement(&mut self, params: &GroupParameters, statement: &Statement) {
        self.append(b"y", &encode(statement.y(), params.element_len()));
    }

    /// Appends the commitment `t`.
    pub fn append_commitment(&mut self, params: &GroupParameters, commitment: &Commitment) {
        self.append(b"t", &encode(commitment.t(), params.element_len()));
    }

    /// Binds everything a Schnorr challenge depends on, in canonical order.
    pub(crate) fn bind_proof_inputs(
        &mut self,
        params: &GroupParameters,
        statement: &Statement,
        commitment: &Commitment,
    ) {
        self.append_parameters(params);
        self.append_statement(params, statement);
        self.append_commitment(params, commitment);
    }

    /// Derives a challenge in `[0, q)` from everything appended so far.
    ///
    /// Hashes the transcript into `⌈log2 q / 8⌉ + 16` bytes so that reduction
    /// modulo `q` has negligible bias, then absorbs the result so a second
    /// call yields an independent challenge.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTranscript`] if nothing was appended.
    pub fn challenge(&mut self, q: &BigUint) -> Result<BigUint> {
        if self.appended == 0 {
            return Err(Error::EmptyTranscript);
        }

        if q.is_zero() {
            return Err(Error::InvalidGroup("Order q cannot be zero".to_string()));
        }

        let scalar_len = byte_len(q);
        let wide = expand_digest(
            CHALLENGE_DST,
            &self.buffer,
            scalar_len + EXTRA_SECURITY_BITS / 8,
        );
        let challenge = BigUint::from_bytes_be(&wide) % q;

        self.append(CHALLENGE_DST, &encode(&challenge, scalar_len));
        Ok(challenge)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(PROTOCOL_LABEL)
    }
}

fn write_field(buffer: &mut Vec<u8>, label: &[u8], value: &[u8]) {
    buffer.extend_from_slice(&(label.len() as u32).to_be_bytes());
    buffer.extend_from_slice(label);
    buffer.extend_from_slice(&(value.len() as u32).to_be_bytes());
    buffer.extend_from_slice(value);
}

/// Fixed-width encoding, falling back to minimal bytes for out-of-range values.
///
/// The length prefix keeps the fallback unambiguous.
fn encode(value: &BigUint, width: usize) -> Vec<u8> {
    to_fixed_be(value, width).unwrap_or_else(|| value.to_bytes_be())
}
