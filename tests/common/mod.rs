//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use num_bigint::BigUint;
use schnorr_zkp::{GroupParameters, NamedGroup};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only logs from the library and the test crates are shown.
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("schnorr_zkp=debug"));

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Safe-prime group with `p = 2q + 1 = 2039`, `q = 1019`, `g = 4`.
///
/// Small enough to make property tests fast; never use outside tests.
pub fn small_group() -> GroupParameters {
    GroupParameters::new(
        BigUint::from(2039u32),
        BigUint::from(1019u32),
        BigUint::from(4u32),
    )
    .expect("small group is valid")
}

/// The toy group `p = 23, q = 22, g = 5`.
///
/// `q` is not prime, so it only loads unchecked. Regression fixture only.
pub fn toy_group() -> GroupParameters {
    GroupParameters::new_unchecked(
        BigUint::from(23u32),
        BigUint::from(22u32),
        BigUint::from(5u32),
    )
}

/// The 2048-bit RFC 5114 group.
pub fn rfc5114_group() -> GroupParameters {
    GroupParameters::named(NamedGroup::Rfc5114_2048_256).expect("named group loads")
}
