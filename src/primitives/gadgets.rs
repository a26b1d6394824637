//! Protocol gadgets for Schnorr proofs.
//!
//! This module contains the values exchanged or held during a proof session:
//! witness, statement, commitment, response, and the finished proof.

use core::fmt;

use num_bigint::{BigUint, RandBigInt};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::arith::wipe;
use super::GroupParameters;
use crate::{Error, Result};

/// Secret witness `x` for a Schnorr proof.
///
/// The prover demonstrates knowledge of `x` such that `y = g^x mod p` without
/// revealing it.
///
/// # Security
///
/// - Zeroized when dropped
/// - Never serialized; `Debug` output is redacted
/// - How `x` is derived (key generation, password hashing) is up to the caller
#[derive(Clone)]
pub struct Witness {
    x: BigUint,
}

impl Witness {
    /// Creates a witness from a secret integer.
    ///
    /// Range checking against `q` happens when the witness is handed to a
    /// [`Prover`](crate::Prover).
    pub fn new(x: BigUint) -> Self {
        Self { x }
    }

    /// Samples a fresh witness uniformly from `[1, q)`.
    pub fn random<R: CryptoRngCore>(params: &GroupParameters, rng: &mut R) -> Self {
        let x = rng.gen_biguint_range(&BigUint::from(1u32), params.q());
        Self { x }
    }

    /// Returns a reference to the secret integer.
    pub(crate) fn secret(&self) -> &BigUint {
        &self.x
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Witness(<redacted>)")
    }
}

impl Zeroize for Witness {
    fn zeroize(&mut self) {
        wipe(&mut self.x);
    }
}

impl Drop for Witness {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Witness {}

/// Public statement `y = g^x mod p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    y: BigUint,
}

impl Statement {
    /// Wraps a public value received from elsewhere.
    pub fn new(y: BigUint) -> Self {
        Self { y }
    }

    /// Computes the statement for a witness.
    pub fn from_witness(params: &GroupParameters, witness: &Witness) -> Self {
        params.statement_for(witness)
    }

    /// Returns the public value `y`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Checks that `y` lies in the order-q subgroup.
    pub fn validate(&self, params: &GroupParameters) -> Result<()> {
        if !params.contains_element(&self.y) {
            return Err(Error::InvalidStatement(
                "y is not an element of the order-q subgroup".to_string(),
            ));
        }
        Ok(())
    }
}

/// First prover message: `t = g^r mod p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    t: BigUint,
}

impl Commitment {
    /// Creates a commitment from its group element.
    pub fn new(t: BigUint) -> Self {
        Self { t }
    }

    /// Returns the commitment value `t`.
    pub fn t(&self) -> &BigUint {
        &self.t
    }
}

/// Prover's answer to the challenge: `s = (r + c·x) mod q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    s: BigUint,
}

impl Response {
    /// Creates a response from its scalar.
    pub fn new(s: BigUint) -> Self {
        Self { s }
    }

    /// Returns the response value `s`.
    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// Complete proof `(t, c, s)`.
///
/// Proofs are immutable once built and can be verified by anyone holding the
/// group parameters and the statement. Wire encoding lives in
/// [`ProofCodec`](crate::ProofCodec).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    commitment: Commitment,
    challenge: BigUint,
    response: Response,
}

impl Proof {
    /// Assembles a proof from its three parts.
    ///
    /// This is typically called by [`Prover`](crate::Prover) and the codec,
    /// not directly by users.
    pub fn new(commitment: Commitment, challenge: BigUint, response: Response) -> Self {
        Self {
            commitment,
            challenge,
            response,
        }
    }

    /// Returns the commitment `t`.
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Returns the challenge `c`.
    pub fn challenge(&self) -> &BigUint {
        &self.challenge
    }

    /// Returns the response `s`.
    pub fn response(&self) -> &Response {
        &self.response
    }
}
