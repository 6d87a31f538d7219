use lazycol_core::arrays::batch::Batch;
use lazycol_core::arrays::column::Column;
use lazycol_core::arrays::scalar::ScalarValue;
use lazycol_core::engine::Engine;
use lazycol_core::engine::reference::ReferenceEngine;
use lazycol_core::expr::col;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_bytes(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let len = rng.random_range(0..64);
    (0..len).map(|_| rng.random::<u8>()).collect()
}

#[test]
fn encode_then_decode_is_identity() {
    logutil::init_test();

    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let inputs: Vec<Vec<u8>> = (0..200).map(|_| random_bytes(&mut rng)).collect();
    let batch = Batch::try_new([Column::from_binary(
        "b",
        inputs.iter().map(|b| Some(b.as_slice())),
    )])
    .unwrap();

    let engine = ReferenceEngine::default();
    let expected: Vec<ScalarValue> = inputs.iter().cloned().map(ScalarValue::Binary).collect();

    for encoding in ["hex", "base64"] {
        let through_str = col("b")
            .bin()
            .encode(encoding)
            .unwrap()
            .str()
            .decode(encoding, true)
            .unwrap();
        let out = engine.evaluate(through_str.handle(), &batch).unwrap();
        assert_eq!(expected.as_slice(), out.values(), "encoding: {encoding}");

        let through_bin = col("b")
            .bin()
            .encode(encoding)
            .unwrap()
            .cast(lazycol_core::arrays::datatype::DataType::Binary, true)
            .unwrap()
            .bin()
            .decode(encoding, true)
            .unwrap();
        let out = engine.evaluate(through_bin.handle(), &batch).unwrap();
        assert_eq!(expected.as_slice(), out.values(), "encoding: {encoding}");
    }
}

#[test]
fn invalid_encoded_text() {
    logutil::init_test();

    let batch = Batch::try_new([Column::from_strs("s", [Some("zz"), Some("6869")])]).unwrap();
    let engine = ReferenceEngine::default();

    let lenient = col("s").str().decode("hex", false).unwrap();
    let out = engine.evaluate(lenient.handle(), &batch).unwrap();
    assert_eq!(
        &[ScalarValue::Null, ScalarValue::Binary(b"hi".to_vec())],
        out.values()
    );

    let strict = col("s").str().decode("hex", true).unwrap();
    let err = engine.evaluate(strict.handle(), &batch).unwrap_err();
    assert!(err.is_compute());
}
