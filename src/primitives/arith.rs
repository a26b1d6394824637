//! Big-integer helpers shared by the group, transcript and codec.

use core::sync::atomic::{compiler_fence, Ordering};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use sha2::{Digest, Sha256};

/// Miller-Rabin rounds used when validating caller-supplied primes.
pub const MILLER_RABIN_ROUNDS: usize = 40;

/// Domain separation tag for deriving Miller-Rabin bases.
const PRIMALITY_DST: &[u8] = b"schnorr-zkp/miller-rabin";

const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Number of bytes needed to hold `n` in big-endian form.
pub fn byte_len(n: &BigUint) -> usize {
    (n.bits() as usize).div_ceil(8)
}

/// Left-pads the big-endian encoding of `value` to exactly `width` bytes.
///
/// Returns `None` if the value does not fit.
pub fn to_fixed_be(value: &BigUint, width: usize) -> Option<Vec<u8>> {
    let mut out = vec![0u8; width];
    if value.is_zero() {
        return Some(out);
    }

    let bytes = value.to_bytes_be();
    if bytes.len() > width {
        return None;
    }
    out[width - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// `(a - b) mod m` for `a, b < m`.
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        (a - b) % m
    } else {
        (m - (b - a) % m) % m
    }
}

/// Multiplicative inverse of `a` modulo `m`, if it exists.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let egcd = a.extended_gcd(&m_int);
    if !egcd.gcd.is_one() {
        return None;
    }

    egcd.x.mod_floor(&m_int).to_biguint()
}

/// Expands `input` into `len` pseudo-random bytes with SHA-256 in counter mode.
///
/// `SHA-256(input)` is used as the seed and block `i` is
/// `SHA-256(domain || seed || u32be(i))`.
pub fn expand_digest(domain: &[u8], input: &[u8], len: usize) -> Vec<u8> {
    let seed = Sha256::digest(input);
    let mut out = Vec::with_capacity(len + 32);
    let mut counter: u32 = 0;

    while out.len() < len {
        let block = Sha256::new()
            .chain_update(domain)
            .chain_update(seed)
            .chain_update(counter.to_be_bytes())
            .finalize();
        out.extend_from_slice(&block);
        counter = counter.wrapping_add(1);
    }

    out.truncate(len);
    out
}

/// Probabilistic primality test (trial division, then Miller-Rabin).
///
/// Witness bases are derived from a hash of `n`, so the result is a pure
/// function of its inputs and the bases cannot be chosen by whoever picked `n`.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }

    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if *n == small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let trailing = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> trailing;

    // bases are drawn from [2, n - 2]
    let base_range = n - 3u32;
    let n_bytes = n.to_bytes_be();
    let sample_len = byte_len(n) + 16;

    'witness: for round in 0..rounds {
        let mut input = n_bytes.clone();
        input.extend_from_slice(&(round as u64).to_be_bytes());
        let sample = BigUint::from_bytes_be(&expand_digest(PRIMALITY_DST, &input, sample_len));
        let base = sample % &base_range + 2u32;

        let mut x = base.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..trailing {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Overwrites the limbs of a secret integer with zeros, then resets it.
///
/// Best effort only. `BigUint` does not expose its buffer, so the zeros go
/// through `assign_from_slice`, which may shrink or free the allocation, and
/// the compiler may still elide those stores. Copies left behind by earlier
/// arithmetic reallocations are not reached at all.
pub fn wipe(value: &mut BigUint) {
    let digits = (value.bits() as usize).div_ceil(32);
    value.assign_from_slice(&vec![0u32; digits]);
    compiler_fence(Ordering::SeqCst);
}
