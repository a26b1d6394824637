//! Schnorr zero-knowledge proofs of knowledge of a discrete logarithm.
//!
//! A prover convinces a verifier that it knows `x` with `y = g^x mod p`
//! without revealing `x`, over any prime-order subgroup `(p, q, g)` of
//! `Z_p^*`:
//!
//! ```text
//! Prover                                  Verifier
//!   r <- [0, q),  t = g^r        --- t -->
//!                                <-- c ---   c <- [0, q)
//!   s = (r + c·x) mod q          --- s -->
//!                                            g^s == t · y^c (mod p)
//! ```
//!
//! The non-interactive variant derives `c` from a SHA-256 [`Transcript`]
//! over the group, the statement and the commitment (Fiat-Shamir).
//!
//! # Examples
//!
//! ```rust
//! use schnorr_zkp::{
//!     prove_noninteractive, verify_noninteractive, GroupParameters, NamedGroup, ProofCodec,
//!     SecureRng, Statement, Witness,
//! };
//!
//! let params = GroupParameters::named(NamedGroup::Rfc5114_2048_256).unwrap();
//! let mut rng = SecureRng::new();
//!
//! let witness = Witness::random(&params, &mut rng);
//! let statement = Statement::from_witness(&params, &witness);
//! let proof = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();
//!
//! let bytes = ProofCodec::new(&params).encode(&proof).unwrap();
//! let received = ProofCodec::new(&params).decode(&bytes).unwrap();
//! assert!(verify_noninteractive(&params, &statement, &received).unwrap());
//! ```
//!
//! # Features
//!
//! - `transport` (default): async [`Channel`] abstraction and session drivers
//! - `config` (default): [`GroupConfig`] loading from `.env`, TOML and the environment

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Fixed-width proof wire format.
pub mod codec;
/// Group selection from configuration.
#[cfg(feature = "config")]
pub mod config;
/// Error types.
pub mod error;
/// Core building blocks.
pub mod primitives;
/// Prover, verifier and session drivers.
pub mod protocol;

pub use codec::ProofCodec;
#[cfg(feature = "config")]
pub use config::GroupConfig;
pub use error::{Error, Result};
pub use primitives::{
    Commitment, GroupParameters, NamedGroup, Proof, Response, SecureRng, Statement, Transcript,
    Witness,
};
#[cfg(feature = "transport")]
pub use protocol::{run_prover, run_verifier, Channel, Message, StreamChannel};
pub use protocol::{
    extract_witness, prove_noninteractive, prove_noninteractive_with_transcript, verify,
    verify_noninteractive, verify_noninteractive_with_transcript, BatchVerifier, Prover,
    ProverState, VerifierSession,
};
