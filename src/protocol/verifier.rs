use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand_core::CryptoRngCore;
use tracing::{debug, trace};

use crate::{
    Commitment, Error, GroupParameters, Proof, Response, Result, Statement, Transcript,
};

/// Verifies a proof against the group equation `g^s ≡ t · y^c (mod p)`.
///
/// Pure: no state is read or written besides the arguments. The challenge is
/// taken from the proof as is, which is correct for interactive proofs where
/// the verifier chose `c`. Use [`verify_noninteractive`] for Fiat-Shamir
/// proofs.
///
/// Returns `Ok(false)` when the proof is well-formed but false.
///
/// # Errors
///
/// - [`Error::MalformedProof`] if `t ∉ (0, p)`, `c ≥ q` or `s ≥ q`; checked
///   before any exponentiation
/// - [`Error::InvalidStatement`] if `y` is not in the order-q subgroup
pub fn verify(params: &GroupParameters, statement: &Statement, proof: &Proof) -> Result<bool> {
    check_ranges(params, proof)?;
    statement.validate(params)?;

    Ok(equation_holds(params, statement, proof))
}

/// Verifies a non-interactive proof under the default transcript.
///
/// # Errors
///
/// As [`verify`], plus [`Error::ChallengeMismatch`] if the embedded challenge
/// is not the one derived from `(params, statement, t)`.
pub fn verify_noninteractive(
    params: &GroupParameters,
    statement: &Statement,
    proof: &Proof,
) -> Result<bool> {
    let mut transcript = Transcript::default();
    verify_noninteractive_with_transcript(params, statement, proof, &mut transcript)
}

/// Verifies a non-interactive proof using a custom transcript.
///
/// The transcript must match the one used during proof generation. This is
/// critical for security as it binds the proof to a specific context (e.g.,
/// session ID) and prevents replay attacks.
pub fn verify_noninteractive_with_transcript(
    params: &GroupParameters,
    statement: &Statement,
    proof: &Proof,
    transcript: &mut Transcript,
) -> Result<bool> {
    check_ranges(params, proof)?;
    statement.validate(params)?;

    transcript.bind_proof_inputs(params, statement, proof.commitment());
    let expected = transcript.challenge(params.q())?;
    if &expected != proof.challenge() {
        debug!("proof rejected: challenge does not match transcript");
        return Err(Error::ChallengeMismatch);
    }

    Ok(equation_holds(params, statement, proof))
}

pub(crate) fn check_ranges(params: &GroupParameters, proof: &Proof) -> Result<()> {
    let t = proof.commitment().t();
    if t.is_zero() || t >= params.p() {
        debug!("proof rejected: commitment out of range");
        return Err(Error::MalformedProof(
            "Commitment t must satisfy 0 < t < p".to_string(),
        ));
    }

    if proof.challenge() >= params.q() {
        debug!("proof rejected: challenge out of range");
        return Err(Error::MalformedProof(
            "Challenge c must be less than q".to_string(),
        ));
    }

    if proof.response().s() >= params.q() {
        debug!("proof rejected: response out of range");
        return Err(Error::MalformedProof(
            "Response s must be less than q".to_string(),
        ));
    }

    Ok(())
}

pub(crate) fn equation_holds(
    params: &GroupParameters,
    statement: &Statement,
    proof: &Proof,
) -> bool {
    let lhs = params.exp_g(proof.response().s());
    let y_c = params.exp(statement.y(), proof.challenge());
    let rhs = params.mul(proof.commitment().t(), &y_c);

    let accepted = lhs == rhs;
    if !accepted {
        debug!("proof rejected: verification equation does not hold");
    }
    accepted
}

enum SessionState {
    AwaitingCommitment,
    Challenged {
        commitment: Commitment,
        challenge: BigUint,
    },
    Done {
        proof: Proof,
        accepted: bool,
    },
}

/// Verifier side of one interactive Schnorr session.
///
/// Moves `AwaitingCommitment -> Challenged -> Done`. The challenge is drawn
/// uniformly from `[0, q)` only after the commitment arrives, which is what
/// makes the interactive protocol sound.
pub struct VerifierSession<'a> {
    params: &'a GroupParameters,
    statement: Statement,
    state: SessionState,
}

impl<'a> VerifierSession<'a> {
    /// Creates a new session for a public statement.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStatement`] if `y` is not in the order-q subgroup.
    pub fn new(params: &'a GroupParameters, statement: Statement) -> Result<Self> {
        statement.validate(params)?;
        Ok(Self {
            params,
            statement,
            state: SessionState::AwaitingCommitment,
        })
    }

    /// Returns the statement being verified.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Accepts the prover's commitment and returns a fresh random challenge.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if a commitment was already received,
    /// [`Error::MalformedProof`] if `t ∉ (0, p)`.
    pub fn receive_commitment<R: CryptoRngCore>(
        &mut self,
        commitment: Commitment,
        rng: &mut R,
    ) -> Result<BigUint> {
        if !matches!(self.state, SessionState::AwaitingCommitment) {
            return Err(Error::InvalidState(
                "Commitment already received".to_string(),
            ));
        }

        let t = commitment.t();
        if t.is_zero() || t >= self.params.p() {
            return Err(Error::MalformedProof(
                "Commitment t must satisfy 0 < t < p".to_string(),
            ));
        }

        let challenge = rng.gen_biguint_below(self.params.q());
        self.state = SessionState::Challenged {
            commitment,
            challenge: challenge.clone(),
        };

        trace!("verifier issued challenge");
        Ok(challenge)
    }

    /// Checks the prover's response; returns whether the proof is accepted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless a challenge is outstanding,
    /// [`Error::MalformedProof`] if `s ≥ q`.
    pub fn receive_response(&mut self, response: Response) -> Result<bool> {
        let proof = match &self.state {
            SessionState::Challenged {
                commitment,
                challenge,
            } => Proof::new(commitment.clone(), challenge.clone(), response),
            SessionState::AwaitingCommitment => {
                return Err(Error::InvalidState(
                    "Response received before commitment".to_string(),
                ))
            }
            SessionState::Done { .. } => {
                return Err(Error::InvalidState(
                    "Session already completed".to_string(),
                ))
            }
        };

        check_ranges(self.params, &proof)?;
        let accepted = equation_holds(self.params, &self.statement, &proof);
        self.state = SessionState::Done { proof, accepted };

        trace!(accepted, "verifier session completed");
        Ok(accepted)
    }

    /// Returns the transcript `(t, c, s)` of a completed session with its verdict.
    pub fn into_proof(self) -> Result<(Proof, bool)> {
        match self.state {
            SessionState::Done { proof, accepted } => Ok((proof, accepted)),
            _ => Err(Error::InvalidState(
                "Session has not completed".to_string(),
            )),
        }
    }
}
