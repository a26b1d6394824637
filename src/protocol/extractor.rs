use num_bigint::BigUint;
use tracing::warn;

use crate::primitives::arith::{mod_inverse, mod_sub};
use crate::{Error, GroupParameters, Proof, Result};

/// Recovers the witness from two accepting proofs that share a commitment.
///
/// Special soundness: with `s1 = r + c1·x` and `s2 = r + c2·x`,
/// `x = (s1 - s2) · (c1 - c2)^{-1} mod q`. This is what makes nonce reuse
/// fatal, and it is how the protocol's soundness is argued.
///
/// The proofs are not verified here; pass accepting transcripts.
///
/// # Errors
///
/// [`Error::ExtractionFailed`] if the commitments differ, the challenges are
/// equal, or `c1 - c2` has no inverse modulo `q`.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use schnorr_zkp::{extract_witness, Commitment, GroupParameters, Proof, Response};
///
/// let params = GroupParameters::new(2039u32.into(), 1019u32.into(), 4u32.into()).unwrap();
/// let (x, r) = (BigUint::from(77u32), BigUint::from(500u32));
/// let t = Commitment::new(params.exp_g(&r));
///
/// let respond = |c: u32| {
///     let s = (&r + BigUint::from(c) * &x) % params.q();
///     Proof::new(t.clone(), c.into(), Response::new(s))
/// };
///
/// assert_eq!(extract_witness(&params, &respond(3), &respond(10)).unwrap(), x);
/// ```
pub fn extract_witness(params: &GroupParameters, first: &Proof, second: &Proof) -> Result<BigUint> {
    if first.commitment() != second.commitment() {
        return Err(Error::ExtractionFailed(
            "Proofs do not share a commitment".to_string(),
        ));
    }

    if first.challenge() == second.challenge() {
        return Err(Error::ExtractionFailed(
            "Challenges must differ".to_string(),
        ));
    }

    let q = params.q();
    let delta_c = mod_sub(first.challenge(), second.challenge(), q);
    let delta_s = mod_sub(first.response().s(), second.response().s(), q);

    let inverse = mod_inverse(&delta_c, q).ok_or_else(|| {
        Error::ExtractionFailed("Challenge difference is not invertible modulo q".to_string())
    })?;

    warn!("witness extracted from a reused commitment");
    Ok((delta_s * inverse) % q)
}
