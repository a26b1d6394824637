mod common;

use schnorr_zkp::{
    prove_noninteractive, prove_noninteractive_with_transcript, BatchVerifier, Error, Proof,
    ProofCodec, Response, SecureRng, Statement, Transcript, Witness,
};
use tracing::info;

use common::{init_tracing, rfc5114_group, small_group};

fn generate(params: &schnorr_zkp::GroupParameters, rng: &mut SecureRng) -> (Statement, Proof) {
    let witness = Witness::random(params, rng);
    let statement = Statement::from_witness(params, &witness);
    let proof = prove_noninteractive(params, witness, &statement, rng).unwrap();
    (statement, proof)
}

#[test]
fn batch_of_decoded_proofs() {
    init_tracing();
    let params = rfc5114_group();
    let codec = ProofCodec::new(&params);
    let mut rng = SecureRng::new();
    let mut batch = BatchVerifier::new(&params);

    for _ in 0..8 {
        let (statement, proof) = generate(&params, &mut rng);
        let wire = codec.encode(&proof).unwrap();
        batch.add(statement, codec.decode(&wire).unwrap()).unwrap();
    }

    let results = batch.verify(&mut rng).unwrap();
    info!(count = results.len(), "batch verified");
    assert_eq!(results, vec![true; 8]);
}

#[test]
fn batch_reports_each_bad_proof() {
    init_tracing();
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let mut batch = BatchVerifier::new(&params);
    let bad = [1usize, 4, 5];

    for i in 0..8 {
        let (statement, proof) = generate(&params, &mut rng);
        let proof = if bad.contains(&i) {
            let s = (proof.response().s() + 7u32) % params.q();
            Proof::new(
                proof.commitment().clone(),
                proof.challenge().clone(),
                Response::new(s),
            )
        } else {
            proof
        };
        batch.add(statement, proof).unwrap();
    }

    let results = batch.verify(&mut rng).unwrap();
    for (i, ok) in results.iter().enumerate() {
        assert_eq!(*ok, !bad.contains(&i), "entry {i}");
    }
}

#[test]
fn swapped_statements_are_rejected() {
    let params = rfc5114_group();
    let mut rng = SecureRng::new();
    let (statement_a, proof_a) = generate(&params, &mut rng);
    let (statement_b, proof_b) = generate(&params, &mut rng);
    if statement_a == statement_b {
        return;
    }

    let mut batch = BatchVerifier::new(&params);
    batch.add(statement_b, proof_a).unwrap();
    batch.add(statement_a, proof_b).unwrap();

    assert_eq!(batch.verify(&mut rng).unwrap(), vec![false, false]);
}

#[test]
fn mixed_contexts() {
    let params = small_group();
    let mut rng = SecureRng::new();
    let mut batch = BatchVerifier::new(&params);

    for session in 0u8..4 {
        let witness = Witness::random(&params, &mut rng);
        let statement = Statement::from_witness(&params, &witness);
        let context = [b's', session];

        let mut transcript = Transcript::default();
        transcript.append_context(&context);
        let proof = prove_noninteractive_with_transcript(
            &params,
            witness,
            &statement,
            &mut rng,
            &mut transcript,
        )
        .unwrap();

        batch.add_with_context(statement, proof, &context).unwrap();
    }

    assert!(batch.verify(&mut rng).unwrap().into_iter().all(|ok| ok));
}

#[test]
fn batch_capacity() {
    let params = small_group();
    let mut rng = SecureRng::new();
    let (statement, proof) = generate(&params, &mut rng);
    let mut batch = BatchVerifier::new(&params);

    while batch.remaining_capacity() > 0 {
        batch.add(statement.clone(), proof.clone()).unwrap();
    }

    let err = batch.add(statement, proof).unwrap_err();
    assert!(matches!(err, Error::BatchFull(_)));
    assert_eq!(batch.len(), 1000);
}
