//! Core building blocks for Schnorr proofs.
//!
//! - **arith**: fixed-width encoding, primality testing, modular helpers
//! - **group**: validated group parameters `(p, q, g)`
//! - **groups**: named standard parameter sets
//! - **gadgets**: witness, statement, commitment, response, proof
//! - **rng**: secure randomness
//! - **transcript**: Fiat-Shamir transform for non-interactive proofs

/// Big-integer helpers.
pub(crate) mod arith;
/// Protocol gadgets (witness, statement, commitment, response, proof).
pub mod gadgets;
/// Group parameters and their validation.
pub mod group;
/// Named parameter sets.
pub mod groups;
/// Cryptographically secure random number generation.
pub mod rng;
/// Transcript for Fiat-Shamir transform.
pub mod transcript;

pub use gadgets::{Commitment, Proof, Response, Statement, Witness};
pub use group::GroupParameters;
pub use groups::NamedGroup;
pub use rng::SecureRng;
pub use transcript::Transcript;
