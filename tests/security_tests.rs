mod common;

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use schnorr_zkp::{
    extract_witness, prove_noninteractive, prove_noninteractive_with_transcript, verify,
    verify_noninteractive, verify_noninteractive_with_transcript, Commitment, Error, Proof,
    ProofCodec, Prover, ProverState, Response, SecureRng, Statement, Transcript, Witness,
};

use common::{init_tracing, rfc5114_group, small_group, toy_group};

fn big(n: u32) -> BigUint {
    BigUint::from(n)
}

#[test]
fn toy_example_regression() {
    init_tracing();
    let params = toy_group();

    let witness = Witness::new(big(6));
    let statement = Statement::from_witness(&params, &witness);
    assert_eq!(statement.y(), &big(8));
    assert_eq!(params.exp_g(&big(4)), big(4));

    let proof = Proof::new(Commitment::new(big(4)), big(3), Response::new(big(0)));
    assert!(verify(&params, &statement, &proof).unwrap());

    let codec = ProofCodec::new(&params);
    let decoded = codec.decode(&codec.encode(&proof).unwrap()).unwrap();
    assert!(verify(&params, &statement, &decoded).unwrap());
}

#[test]
fn toy_group_fails_validation() {
    let err = toy_group().validate().unwrap_err();
    assert!(matches!(err, Error::InvalidGroup(_)));
}

#[test]
fn reused_nonce_leaks_witness() {
    init_tracing();
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let witness = Witness::random(&params, &mut rng);
    let statement = Statement::from_witness(&params, &witness);

    let run = |c: &BigUint| {
        // identical seeds force the same nonce in both sessions
        let mut fixed = StdRng::seed_from_u64(42);
        let mut prover = Prover::new(&params, witness.clone()).unwrap();
        prover.commit(&mut fixed).unwrap();
        prover.respond(c).unwrap();
        prover.finalize().unwrap()
    };

    let first = run(&big(1234));
    let second = run(&big(987_654));
    assert!(verify(&params, &statement, &first).unwrap());
    assert!(verify(&params, &statement, &second).unwrap());

    let x = extract_witness(&params, &first, &second).unwrap();
    assert_eq!(params.exp_g(&x), *statement.y());
}

#[test]
fn fresh_nonces_give_distinct_valid_proofs() {
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let witness = Witness::random(&params, &mut rng);
    let statement = Statement::from_witness(&params, &witness);

    let first = prove_noninteractive(&params, witness.clone(), &statement, &mut rng).unwrap();
    let second = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();

    assert_ne!(first.commitment(), second.commitment());
    assert_ne!(first.response(), second.response());
    assert!(verify_noninteractive(&params, &statement, &first).unwrap());
    assert!(verify_noninteractive(&params, &statement, &second).unwrap());

    assert!(matches!(
        extract_witness(&params, &first, &second),
        Err(Error::ExtractionFailed(_))
    ));
}

#[test]
fn prevent_replay_attack_with_different_contexts() {
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let witness = Witness::random(&params, &mut rng);
    let statement = Statement::from_witness(&params, &witness);

    let mut transcript = Transcript::default();
    transcript.append_context(b"session-1");
    let proof = prove_noninteractive_with_transcript(
        &params,
        witness,
        &statement,
        &mut rng,
        &mut transcript,
    )
    .unwrap();

    let mut same = Transcript::default();
    same.append_context(b"session-1");
    assert!(verify_noninteractive_with_transcript(&params, &statement, &proof, &mut same).unwrap());

    let mut other = Transcript::default();
    other.append_context(b"session-2");
    let result = verify_noninteractive_with_transcript(&params, &statement, &proof, &mut other);
    assert!(!matches!(result, Ok(true)));
}

#[test]
fn proofs_do_not_transfer_between_domains() {
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let witness = Witness::random(&params, &mut rng);
    let statement = Statement::from_witness(&params, &witness);

    let mut transcript = Transcript::new(b"login");
    let proof = prove_noninteractive_with_transcript(
        &params,
        witness,
        &statement,
        &mut rng,
        &mut transcript,
    )
    .unwrap();

    let err = verify_noninteractive(&params, &statement, &proof).unwrap_err();
    assert!(matches!(err, Error::ChallengeMismatch));
    assert!(err.is_untrusted_input());
}

#[test]
fn tampered_challenge_is_rejected() {
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let witness = Witness::random(&params, &mut rng);
    let statement = Statement::from_witness(&params, &witness);
    let proof = prove_noninteractive(&params, witness, &statement, &mut rng).unwrap();

    let c = (proof.challenge() + 1u32) % params.q();
    let tampered = Proof::new(proof.commitment().clone(), c, proof.response().clone());

    assert!(matches!(
        verify_noninteractive(&params, &statement, &tampered),
        Err(Error::ChallengeMismatch)
    ));
    assert!(!verify(&params, &statement, &tampered).unwrap());
}

#[test]
fn forged_proof_without_witness_fails() {
    let params = small_group();
    let mut rng = SecureRng::new();
    let statement = Statement::from_witness(&params, &Witness::random(&params, &mut rng));

    // a forger that knows some other x' commits honestly but cannot answer for y
    let impostor = Witness::random(&params, &mut rng);
    let impostor_statement = Statement::from_witness(&params, &impostor);
    if impostor_statement == statement {
        return;
    }

    let mut prover = Prover::new(&params, impostor).unwrap();
    let commitment = prover.commit(&mut rng).unwrap();
    let challenge = big(5);
    let response = prover.respond(&challenge).unwrap();

    let proof = Proof::new(commitment, challenge, response);
    assert!(!verify(&params, &statement, &proof).unwrap());
}

#[test]
fn statement_outside_subgroup_is_rejected() {
    let params = small_group();
    let proof = Proof::new(Commitment::new(big(16)), big(1), Response::new(big(1)));

    // 2038 = -1 has order 2
    let err = verify(&params, &Statement::new(big(2038)), &proof).unwrap_err();
    assert!(matches!(err, Error::InvalidStatement(_)));
    assert!(err.is_untrusted_input());
}

#[test]
fn state_machine_misuse() {
    let params = small_group();
    let mut rng = SecureRng::new();
    let mut prover = Prover::new(&params, Witness::new(big(11))).unwrap();

    assert!(matches!(
        prover.respond(&big(1)),
        Err(Error::InvalidState(_))
    ));

    prover.commit(&mut rng).unwrap();
    assert!(matches!(
        prover.commit(&mut rng),
        Err(Error::InvalidState(_))
    ));

    prover.respond(&big(1)).unwrap();
    assert_eq!(prover.state(), ProverState::Finalized);
    assert!(matches!(prover.respond(&big(2)), Err(Error::AlreadyFinalized)));
}

#[test]
fn witness_debug_is_redacted() {
    let witness = Witness::new(big(123_456_789));
    let rendered = format!("{witness:?}");
    assert!(!rendered.contains("123456789"));
}
