//! Batch verification for non-interactive Schnorr proofs.
//!
//! All equations `g^{s_i} = t_i · y_i^{c_i}` are folded into one check using
//! random coefficients `a_i`:
//!
//! ```text
//! g^{Σ a_i s_i} = Π t_i^{a_i} · y_i^{a_i c_i}   (mod p)
//! ```
//!
//! A forged proof passes the combined check with probability at most
//! `1 / min(q, 2^128)`. If the combined check fails, entries are re-verified
//! one by one so the caller learns which proofs are bad.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use tracing::debug;

use super::verifier::{check_ranges, equation_holds};
use crate::{Error, GroupParameters, Proof, Result, Statement, Transcript};

/// Maximum number of proofs that can be verified in a single batch.
const MAX_BATCH_SIZE: usize = 1000;

/// Bit length bound for the random batching coefficients.
const COEFFICIENT_BITS: usize = 128;

struct BatchEntry {
    statement: Statement,
    proof: Proof,
    context: Option<Vec<u8>>,
}

/// Accumulates non-interactive proofs over one group and verifies them together.
///
/// # Examples
///
/// ```rust
/// use schnorr_zkp::{
///     prove_noninteractive, BatchVerifier, GroupParameters, NamedGroup, SecureRng, Statement,
///     Witness,
/// };
///
/// let params = GroupParameters::named(NamedGroup::Rfc5114_2048_256).unwrap();
/// let mut rng = SecureRng::new();
/// let mut batch = BatchVerifier::new(&params);
///
/// for _ in 0..3 {
///     let witness = Witness::random(&params, &mut rng);
///     let statement = Statement::from_witness(&params, &witness);
///     let proof = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();
///     batch.add(statement, proof).unwrap();
/// }
///
/// assert_eq!(batch.verify(&mut rng).unwrap(), vec![true, true, true]);
/// ```
pub struct BatchVerifier<'a> {
    params: &'a GroupParameters,
    entries: Vec<BatchEntry>,
}

impl<'a> BatchVerifier<'a> {
    /// Creates a new empty batch verifier.
    pub fn new(params: &'a GroupParameters) -> Self {
        Self {
            params,
            entries: Vec::new(),
        }
    }

    /// Returns the number of proofs currently in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the batch contains no proofs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the remaining capacity before reaching the batch size limit.
    pub fn remaining_capacity(&self) -> usize {
        MAX_BATCH_SIZE.saturating_sub(self.entries.len())
    }

    /// Adds a proof made with the default transcript.
    ///
    /// # Errors
    ///
    /// [`Error::BatchFull`] once 1000 proofs are queued.
    pub fn add(&mut self, statement: Statement, proof: Proof) -> Result<()> {
        self.push(statement, proof, None)
    }

    /// Adds a proof whose transcript carried `context` via
    /// [`Transcript::append_context`].
    pub fn add_with_context(
        &mut self,
        statement: Statement,
        proof: Proof,
        context: &[u8],
    ) -> Result<()> {
        self.push(statement, proof, Some(context.to_vec()))
    }

    fn push(&mut self, statement: Statement, proof: Proof, context: Option<Vec<u8>>) -> Result<()> {
        if self.entries.len() >= MAX_BATCH_SIZE {
            return Err(Error::BatchFull(MAX_BATCH_SIZE));
        }

        self.entries.push(BatchEntry {
            statement,
            proof,
            context,
        });
        Ok(())
    }

    /// Verifies every queued proof; `result[i]` is the verdict for the i-th added proof.
    ///
    /// Malformed entries, invalid statements and challenge mismatches are
    /// reported as `false` rather than failing the whole batch.
    pub fn verify<R: CryptoRngCore>(&self, rng: &mut R) -> Result<Vec<bool>> {
        let mut results = vec![false; self.entries.len()];
        let mut candidates = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            if self.precheck(entry)? {
                candidates.push(index);
            }
        }

        if candidates.is_empty() {
            return Ok(results);
        }

        if self.combined_check(&candidates, rng) {
            for index in candidates {
                results[index] = true;
            }
            return Ok(results);
        }

        debug!(
            batch_size = candidates.len(),
            "combined check failed, verifying individually"
        );
        for index in candidates {
            let entry = &self.entries[index];
            results[index] = equation_holds(self.params, &entry.statement, &entry.proof);
        }

        Ok(results)
    }

    /// Range, subgroup and challenge checks for one entry.
    fn precheck(&self, entry: &BatchEntry) -> Result<bool> {
        if check_ranges(self.params, &entry.proof).is_err() {
            return Ok(false);
        }

        // the combined equation is only sound for elements of the order-q subgroup
        if !self.params.contains_element(entry.statement.y())
            || !self.params.contains_element(entry.proof.commitment().t())
        {
            return Ok(false);
        }

        let mut transcript = Transcript::default();
        if let Some(context) = &entry.context {
            transcript.append_context(context);
        }
        transcript.bind_proof_inputs(self.params, &entry.statement, entry.proof.commitment());

        Ok(&transcript.challenge(self.params.q())? == entry.proof.challenge())
    }

    fn combined_check<R: CryptoRngCore>(&self, candidates: &[usize], rng: &mut R) -> bool {
        let q = self.params.q();
        let one = BigUint::one();
        let coefficient_bound = (BigUint::one() << COEFFICIENT_BITS).min(q.clone());

        let mut lhs_exponent = BigUint::zero();
        let mut rhs = BigUint::one();

        for &index in candidates {
            let entry = &self.entries[index];
            let a = rng.gen_biguint_range(&one, &coefficient_bound);

            lhs_exponent = (lhs_exponent + &a * entry.proof.response().s()) % q;

            let t_a = self.params.exp(entry.proof.commitment().t(), &a);
            let y_ac = self
                .params
                .exp(entry.statement.y(), &((&a * entry.proof.challenge()) % q));
            rhs = self.params.mul(&rhs, &self.params.mul(&t_a, &y_ac));
        }

        self.params.exp_g(&lhs_exponent) == rhs
    }
}
