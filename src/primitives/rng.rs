//! Randomness for nonces, interactive challenges and batch coefficients.

use rand_core::{CryptoRng, OsRng, RngCore};

/// Operating-system backed random number generator for nonces and challenges.
///
/// Stateless: every instance draws from the OS entropy source, so independent
/// sessions on different threads may each hold their own copy without any
/// shared lock.
///
/// A `Prover` and a `VerifierSession` only borrow a generator for the call
/// that samples from it, so a session can keep its own copy for its whole
/// lifetime. Copies never replay each other's output, which is what keeps
/// nonces from repeating across sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}
