use num_bigint::{BigUint, RandBigInt};
use rand_core::CryptoRngCore;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::primitives::arith::wipe;
use crate::{
    Commitment, Error, GroupParameters, Proof, Response, Result, Statement, Transcript, Witness,
};

/// Observable state of a [`Prover`] session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProverState {
    /// No commitment sent yet.
    Idle,
    /// Commitment sent; waiting for the challenge.
    Committed,
    /// Response computed; the nonce is gone.
    Finalized,
}

enum Session {
    Idle,
    Committed {
        nonce: Nonce,
        commitment: Commitment,
    },
    Finalized {
        proof: Proof,
    },
}

/// Prover side of one Schnorr proof session.
///
/// Proves knowledge of `x` such that `y = g^x mod p` without revealing `x`.
/// A session moves strictly `Idle -> Committed -> Finalized`; each session
/// samples exactly one nonce and answers exactly one challenge.
///
/// # Security
///
/// - Always pass a cryptographically secure RNG such as [`SecureRng`](crate::SecureRng)
/// - Never answer two challenges with the same nonce: two responses for one
///   commitment reveal `x` (see [`extract_witness`](crate::extract_witness))
/// - The nonce and witness are zeroized when the session is dropped, in any state
pub struct Prover<'a> {
    params: &'a GroupParameters,
    witness: Witness,
    statement: Statement,
    session: Session,
}

impl<'a> Prover<'a> {
    /// Creates a new prover session in the `Idle` state.
    ///
    /// The statement is computed once from the witness as `y = g^x`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWitness`] if `x >= q`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use schnorr_zkp::{GroupParameters, NamedGroup, Prover, SecureRng, Witness};
    ///
    /// let params = GroupParameters::named(NamedGroup::Rfc5114_2048_256).unwrap();
    /// let mut rng = SecureRng::new();
    /// let witness = Witness::random(&params, &mut rng);
    ///
    /// let prover = Prover::new(&params, witness).unwrap();
    /// ```
    pub fn new(params: &'a GroupParameters, witness: Witness) -> Result<Self> {
        if witness.secret() >= params.q() {
            return Err(Error::InvalidWitness(
                "Witness must be less than the group order q".to_string(),
            ));
        }

        let statement = params.statement_for(&witness);
        Ok(Self {
            params,
            witness,
            statement,
            session: Session::Idle,
        })
    }

    /// Returns the public statement.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Returns the current session state.
    pub fn state(&self) -> ProverState {
        match self.session {
            Session::Idle => ProverState::Idle,
            Session::Committed { .. } => ProverState::Committed,
            Session::Finalized { .. } => ProverState::Finalized,
        }
    }

    /// First move: samples the nonce `r` and returns `t = g^r mod p`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if already committed, [`Error::AlreadyFinalized`]
    /// after the response was computed.
    pub fn commit<R: CryptoRngCore>(&mut self, rng: &mut R) -> Result<Commitment> {
        match self.session {
            Session::Idle => {}
            Session::Committed { .. } => {
                return Err(Error::InvalidState(
                    "Commitment already generated for this session".to_string(),
                ))
            }
            Session::Finalized { .. } => return Err(Error::AlreadyFinalized),
        }

        let nonce = Nonce::random(self.params, rng);
        let commitment = Commitment::new(self.params.exp_g(nonce.r()));
        self.session = Session::Committed {
            nonce,
            commitment: commitment.clone(),
        };

        trace!("prover committed");
        Ok(commitment)
    }

    /// Third move: answers the challenge with `s = (r + c·x) mod q`.
    ///
    /// The nonce is wiped as the session moves to `Finalized`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] before [`commit`](Self::commit)
    /// - [`Error::AlreadyFinalized`] on a second call
    /// - [`Error::InvalidChallenge`] if `c >= q`; the session stays `Committed`
    pub fn respond(&mut self, challenge: &BigUint) -> Result<Response> {
        let q = self.params.q();

        let proof = match &self.session {
            Session::Committed { nonce, commitment } => {
                if challenge >= q {
                    return Err(Error::InvalidChallenge);
                }

                // c·x is as sensitive as x itself
                let mut masked = challenge * self.witness.secret();
                masked += nonce.r();
                let s = &masked % q;
                wipe(&mut masked);
                Proof::new(commitment.clone(), challenge.clone(), Response::new(s))
            }
            Session::Idle => {
                return Err(Error::InvalidState(
                    "Cannot respond before committing".to_string(),
                ))
            }
            Session::Finalized { .. } => return Err(Error::AlreadyFinalized),
        };

        let response = proof.response().clone();
        // dropping the committed session zeroizes the nonce
        self.session = Session::Finalized { proof };

        trace!("prover responded");
        Ok(response)
    }

    /// Returns the finished proof `(t, c, s)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the session is `Finalized`.
    pub fn finalize(self) -> Result<Proof> {
        match self.session {
            Session::Finalized { proof } => Ok(proof),
            Session::Idle | Session::Committed { .. } => Err(Error::InvalidState(
                "Proof is only available after the response".to_string(),
            )),
        }
    }
}

/// Generates a non-interactive proof using Fiat-Shamir.
///
/// This is the recommended method for most use cases.
///
/// # Errors
///
/// [`Error::InvalidWitness`] if `x >= q` or `statement` is not `g^x`.
///
/// # Examples
///
/// ```rust
/// use schnorr_zkp::{
///     prove_noninteractive, verify_noninteractive, GroupParameters, NamedGroup, SecureRng,
///     Statement, Witness,
/// };
///
/// let params = GroupParameters::named(NamedGroup::Rfc5114_2048_256).unwrap();
/// let mut rng = SecureRng::new();
/// let witness = Witness::random(&params, &mut rng);
/// let statement = Statement::from_witness(&params, &witness);
///
/// let proof = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();
/// assert!(verify_noninteractive(&params, &statement, &proof).unwrap());
/// ```
pub fn prove_noninteractive<R: CryptoRngCore>(
    params: &GroupParameters,
    witness: Witness,
    statement: &Statement,
    rng: &mut R,
) -> Result<Proof> {
    let mut transcript = Transcript::default();
    prove_noninteractive_with_transcript(params, witness, statement, rng, &mut transcript)
}

/// Generates a non-interactive proof using a caller-supplied transcript.
///
/// Allows the caller to bind additional context (session IDs, verifier
/// nonces); the verifier must replay the same context.
pub fn prove_noninteractive_with_transcript<R: CryptoRngCore>(
    params: &GroupParameters,
    witness: Witness,
    statement: &Statement,
    rng: &mut R,
    transcript: &mut Transcript,
) -> Result<Proof> {
    let mut prover = Prover::new(params, witness)?;
    if prover.statement() != statement {
        return Err(Error::InvalidWitness(
            "Statement does not match the witness".to_string(),
        ));
    }

    let commitment = prover.commit(rng)?;
    transcript.bind_proof_inputs(params, statement, &commitment);
    let challenge = transcript.challenge(params.q())?;

    prover.respond(&challenge)?;
    prover.finalize()
}

/// Secret nonce `r` used in the commitment phase.
///
/// Automatically zeroized when dropped.
struct Nonce {
    r: BigUint,
}

impl Nonce {
    fn random<R: CryptoRngCore>(params: &GroupParameters, rng: &mut R) -> Self {
        Self {
            r: rng.gen_biguint_below(params.q()),
        }
    }

    fn r(&self) -> &BigUint {
        &self.r
    }
}

impl Zeroize for Nonce {
    fn zeroize(&mut self) {
        wipe(&mut self.r);
    }
}

impl Drop for Nonce {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Nonce {}
