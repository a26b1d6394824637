#![no_main]

use libfuzzer_sys::fuzz_target;
use schnorr_zkp::{verify, GroupParameters, NamedGroup, ProofCodec, Statement};

fuzz_target!(|data: &[u8]| {
    let Ok(params) = GroupParameters::named(NamedGroup::Rfc5114_2048_256) else {
        return;
    };
    let codec = ProofCodec::new(&params);

    if let Ok(proof) = codec.decode(data) {
        assert_eq!(codec.encode(&proof).ok().as_deref(), Some(data));
        let _ = verify(&params, &Statement::new(params.g().clone()), &proof);
    }
});
