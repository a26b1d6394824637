/// Batch verification of non-interactive proofs.
pub mod batch;
/// Message transport and interactive session drivers.
#[cfg(feature = "transport")]
pub mod channel;
/// Witness extraction from two transcripts sharing a commitment.
pub mod extractor;
/// Prover implementation for generating proofs.
pub mod prover;
/// Verifier implementation for validating proofs.
pub mod verifier;

pub use batch::BatchVerifier;
#[cfg(feature = "transport")]
pub use channel::{run_prover, run_verifier, Channel, Message, StreamChannel};
pub use extractor::extract_witness;
pub use prover::{prove_noninteractive, prove_noninteractive_with_transcript, Prover, ProverState};
pub use verifier::{
    verify, verify_noninteractive, verify_noninteractive_with_transcript, VerifierSession,
};
