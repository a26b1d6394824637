#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use schnorr_zkp::{GroupParameters, NamedGroup, Statement};

fuzz_target!(|data: &[u8]| {
    let Ok(params) = GroupParameters::named(NamedGroup::Rfc5114_2048_256) else {
        return;
    };

    let statement = Statement::new(BigUint::from_bytes_be(data));
    let _ = statement.validate(&params);
});
