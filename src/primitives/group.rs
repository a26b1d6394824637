//! Prime-order subgroup of `Z_p^*` used by every prover and verifier.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use super::arith::{byte_len, is_probable_prime, MILLER_RABIN_ROUNDS};
use super::groups::NamedGroup;
use super::{Statement, Witness};
use crate::{Error, Result};

/// Public group description `(p, q, g)`.
///
/// `g` generates the subgroup of prime order `q` inside `Z_p^*`. Instances are
/// immutable once built and are shared by reference between any number of
/// concurrent prover and verifier sessions.
///
/// # Security
///
/// An invalid group breaks soundness (forged proofs) or completeness (honest
/// proofs rejected). Use [`GroupParameters::new`] or
/// [`GroupParameters::named`]; [`GroupParameters::new_unchecked`] exists for
/// regression fixtures only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    element_len: usize,
    scalar_len: usize,
}

impl GroupParameters {
    /// Builds and fully validates caller-supplied parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroup`] if `p` or `q` is not prime, `q` does not
    /// divide `p - 1`, `g` is not in `(1, p)`, or `g^q mod p != 1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use num_bigint::BigUint;
    /// use schnorr_zkp::GroupParameters;
    ///
    /// let params = GroupParameters::new(
    ///     BigUint::from(2039u32),
    ///     BigUint::from(1019u32),
    ///     BigUint::from(4u32),
    /// )
    /// .unwrap();
    /// assert_eq!(params.scalar_len(), 2);
    /// ```
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let params = Self::new_unchecked(p, q, g);
        params.validate()?;
        debug!(
            p_bits = params.p.bits(),
            q_bits = params.q.bits(),
            "validated group parameters"
        );
        Ok(params)
    }

    /// Loads a pre-certified standard parameter set.
    ///
    /// Primality is taken from the standard; the structural checks still run.
    pub fn named(group: NamedGroup) -> Result<Self> {
        let (p, q, g) = group.constants()?;
        let params = Self::new_unchecked(p, q, g);
        params.check_structure()?;
        debug!(group = group.name(), "loaded named group parameters");
        Ok(params)
    }

    /// Builds parameters without any validation.
    ///
    /// Only for fixtures whose values are known in advance, such as the toy
    /// group `p = 23, q = 22, g = 5` whose order is not prime.
    pub fn new_unchecked(p: BigUint, q: BigUint, g: BigUint) -> Self {
        let element_len = byte_len(&p);
        let scalar_len = byte_len(&q);
        Self {
            p,
            q,
            g,
            element_len,
            scalar_len,
        }
    }

    /// Runs every check, including Miller-Rabin on `p` and `q`.
    pub fn validate(&self) -> Result<()> {
        self.check_structure()?;

        if !is_probable_prime(&self.q, MILLER_RABIN_ROUNDS) {
            return Err(Error::InvalidGroup("Order q is not prime".to_string()));
        }

        if !is_probable_prime(&self.p, MILLER_RABIN_ROUNDS) {
            return Err(Error::InvalidGroup("Modulus p is not prime".to_string()));
        }

        Ok(())
    }

    fn check_structure(&self) -> Result<()> {
        if self.p <= BigUint::from(3u32) {
            return Err(Error::InvalidGroup("Modulus p is too small".to_string()));
        }

        if self.q < BigUint::from(2u32) {
            return Err(Error::InvalidGroup(
                "Order q must be at least 2".to_string(),
            ));
        }

        if !((&self.p - 1u32) % &self.q).is_zero() {
            return Err(Error::InvalidGroup(
                "Order q does not divide p - 1".to_string(),
            ));
        }

        if self.g <= BigUint::one() || self.g >= self.p {
            return Err(Error::InvalidGroup(
                "Generator must satisfy 1 < g < p".to_string(),
            ));
        }

        if !self.g.modpow(&self.q, &self.p).is_one() {
            return Err(Error::InvalidGroup(
                "Generator does not have order q".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the field modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Byte width of a group element (`⌈log2 p / 8⌉`).
    pub fn element_len(&self) -> usize {
        self.element_len
    }

    /// Byte width of a scalar (`⌈log2 q / 8⌉`).
    pub fn scalar_len(&self) -> usize {
        self.scalar_len
    }

    /// Checks `0 < e < p` and `e^q ≡ 1 (mod p)`.
    pub fn contains_element(&self, e: &BigUint) -> bool {
        !e.is_zero() && *e < self.p && e.modpow(&self.q, &self.p).is_one()
    }

    /// Computes `g^exponent mod p`.
    pub fn exp_g(&self, exponent: &BigUint) -> BigUint {
        self.g.modpow(exponent, &self.p)
    }

    /// Computes `base^exponent mod p`.
    pub fn exp(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.p)
    }

    /// Computes `a * b mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// Derives the public statement `y = g^x mod p`.
    pub fn statement_for(&self, witness: &Witness) -> Statement {
        Statement::new(self.exp_g(witness.secret()))
    }
}
