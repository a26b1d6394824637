//! Fixed-width wire format for proofs.
//!
//! A proof is `t || c || s`, each a big-endian unsigned integer left-padded to
//! a width fixed by the group: `t` takes the byte length of `p`, `c` and `s`
//! the byte length of `q`. There is no header; both parties know the group
//! out of band.

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

use crate::primitives::arith::to_fixed_be;
use crate::{Commitment, Error, GroupParameters, Proof, Response, Result};

/// Encoder/decoder bound to one group.
///
/// # Examples
///
/// ```rust
/// use schnorr_zkp::{
///     prove_noninteractive, GroupParameters, NamedGroup, ProofCodec, SecureRng, Statement,
///     Witness,
/// };
///
/// let params = GroupParameters::named(NamedGroup::Rfc5114_2048_256).unwrap();
/// let mut rng = SecureRng::new();
/// let witness = Witness::random(&params, &mut rng);
/// let statement = Statement::from_witness(&params, &witness);
/// let proof = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();
///
/// let codec = ProofCodec::new(&params);
/// let bytes = codec.encode(&proof).unwrap();
/// assert_eq!(bytes.len(), 256 + 32 + 32);
/// assert_eq!(codec.decode(&bytes).unwrap(), proof);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProofCodec<'a> {
    params: &'a GroupParameters,
}

impl<'a> ProofCodec<'a> {
    /// Creates a codec for proofs over `params`.
    pub fn new(params: &'a GroupParameters) -> Self {
        Self { params }
    }

    /// Size in bytes of every encoded proof for this group.
    pub fn encoded_len(&self) -> usize {
        self.params.element_len() + 2 * self.params.scalar_len()
    }

    /// Encodes a proof.
    ///
    /// # Errors
    ///
    /// [`Error::FieldOutOfRange`] if a field does not fit its width, which
    /// only happens for proofs built by hand with oversized values.
    pub fn encode(&self, proof: &Proof) -> Result<Vec<u8>> {
        let element_len = self.params.element_len();
        let scalar_len = self.params.scalar_len();

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend(
            to_fixed_be(proof.commitment().t(), element_len).ok_or(Error::FieldOutOfRange("t"))?,
        );
        out.extend(to_fixed_be(proof.challenge(), scalar_len).ok_or(Error::FieldOutOfRange("c"))?);
        out.extend(
            to_fixed_be(proof.response().s(), scalar_len).ok_or(Error::FieldOutOfRange("s"))?,
        );

        Ok(out)
    }

    /// Decodes and range-checks a proof.
    ///
    /// A successful decode does not mean the proof verifies; it only means
    /// `0 < t < p`, `c < q` and `s < q`.
    ///
    /// # Errors
    ///
    /// - [`Error::TruncatedInput`] if `bytes` is shorter than [`encoded_len`](Self::encoded_len)
    /// - [`Error::TrailingBytes`] if it is longer
    /// - [`Error::FieldOutOfRange`] naming the first field outside its range
    pub fn decode(&self, bytes: &[u8]) -> Result<Proof> {
        let expected = self.encoded_len();
        if bytes.len() < expected {
            debug!(expected, actual = bytes.len(), "truncated proof");
            return Err(Error::TruncatedInput {
                expected,
                actual: bytes.len(),
            });
        }
        if bytes.len() > expected {
            debug!(expected, actual = bytes.len(), "proof has trailing bytes");
            return Err(Error::TrailingBytes(bytes.len() - expected));
        }

        let (t_bytes, rest) = bytes.split_at(self.params.element_len());
        let (c_bytes, s_bytes) = rest.split_at(self.params.scalar_len());

        let t = BigUint::from_bytes_be(t_bytes);
        if t.is_zero() || &t >= self.params.p() {
            return Err(Error::FieldOutOfRange("t"));
        }

        let c = BigUint::from_bytes_be(c_bytes);
        if &c >= self.params.q() {
            return Err(Error::FieldOutOfRange("c"));
        }

        let s = BigUint::from_bytes_be(s_bytes);
        if &s >= self.params.q() {
            return Err(Error::FieldOutOfRange("s"));
        }

        Ok(Proof::new(Commitment::new(t), c, Response::new(s)))
    }

    /// Encodes a proof as lowercase hex of its binary form.
    pub fn encode_hex(&self, proof: &Proof) -> Result<String> {
        self.encode(proof).map(hex::encode)
    }

    /// Decodes a proof from hex; accepts either case.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncoding`] for malformed hex, then as [`decode`](Self::decode).
    pub fn decode_hex(&self, text: &str) -> Result<Proof> {
        let bytes = hex::decode(text.trim()).map_err(|e| Error::InvalidEncoding(e.to_string()))?;
        self.decode(&bytes)
    }
}
