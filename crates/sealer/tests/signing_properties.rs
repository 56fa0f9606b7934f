//! Property tests for the signing engine.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use proptest::prelude::*;
use sealer::{Encrypter, Key, KeyRing, SealError, KEY_LEN};
use serde_json::Value;

fn open_envelope(payload: &str) -> Value {
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap()
}

fn seal_envelope(envelope: &Value) -> String {
    URL_SAFE_NO_PAD.encode(envelope.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sign_verify_roundtrip(
        map in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8),
    ) {
        let enc = Encrypter::new(KeyRing::single(Key::generate()));
        let payload = enc.sign(&map).unwrap();
        let out: std::collections::BTreeMap<String, i64> = enc.verify(&payload).unwrap();
        prop_assert_eq!(out, map);
    }

    #[test]
    fn prop_mutated_signature_rejected(index in 0usize..64, text in ".{0,32}") {
        let enc = Encrypter::new(KeyRing::single(Key::generate()));
        let mut env = open_envelope(&enc.sign(&text).unwrap());
        let mut sig: Vec<char> = env["signature"].as_str().unwrap().chars().collect();
        sig[index] = if sig[index] == 'a' { 'b' } else { 'a' };
        env["signature"] = Value::String(sig.into_iter().collect());
        let res: Result<String, _> = enc.verify(&seal_envelope(&env));
        prop_assert_eq!(res, Err(SealError::Signature));
    }

    #[test]
    fn prop_mutated_value_rejected(original in any::<i64>(), forged in any::<i64>()) {
        prop_assume!(original != forged);
        let enc = Encrypter::new(KeyRing::single(Key::generate()));
        let mut env = open_envelope(&enc.sign(&original).unwrap());
        env["value"] = Value::String(forged.to_string());
        let res: Result<i64, _> = enc.verify(&seal_envelope(&env));
        prop_assert_eq!(res, Err(SealError::Signature));
    }
}

#[test]
fn signature_from_retired_key_rejected() {
    let k_old = [1u8; KEY_LEN];
    let k_new = [2u8; KEY_LEN];
    let payload = Encrypter::new(KeyRing::from_bytes([k_old]).unwrap())
        .sign("old")
        .unwrap();

    let rotated = Encrypter::new(KeyRing::from_bytes([k_new, k_old]).unwrap());
    assert_eq!(rotated.verify::<String>(&payload).unwrap(), "old");

    let retired = Encrypter::new(KeyRing::from_bytes([k_new]).unwrap());
    assert_eq!(retired.verify::<String>(&payload), Err(SealError::Signature));
}

#[test]
fn new_signatures_use_active_key() {
    let k_old = [1u8; KEY_LEN];
    let k_new = [2u8; KEY_LEN];
    let payload = Encrypter::new(KeyRing::from_bytes([k_new, k_old]).unwrap())
        .sign(&7)
        .unwrap();
    let legacy = Encrypter::new(KeyRing::from_bytes([k_old]).unwrap());
    assert_eq!(legacy.verify::<i32>(&payload), Err(SealError::Signature));
}

#[test]
fn encrypted_payload_is_not_a_signed_payload() {
    let enc = Encrypter::new(KeyRing::single(Key::generate()));
    let encrypted = enc
        .encrypt("secret", &sealer::EncryptOptions::new())
        .unwrap();
    assert_eq!(enc.verify::<String>(&encrypted), Err(SealError::Signature));
}
