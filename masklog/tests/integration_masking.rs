//! End-to-end masking: payloads attached to an event reach the output masked.

mod common;

use common::{capture, config};
use serde::Serialize;
use serde_json::json;

#[test]
fn nested_sensitive_fields_are_masked() {
    let (logger, out) = capture(&config(true, &["credit_card"]));
    logger
        .info()
        .with_fields(json!({
            "data": { "password": "P@ssw0rd", "firstname": "John" },
            "credit_card": "123",
        }))
        .msg("checkout");

    let record = out.single();
    assert_eq!(record["data"], json!({ "password": "***", "firstname": "***" }));
    assert_eq!(record["credit_card"], "***");
    assert_eq!(record["message"], "checkout");
    assert_eq!(record["severity"], "info");
}

#[test]
fn unlisted_keys_pass_through_with_default_classifier() {
    let (logger, out) = capture(&config(true, &[]));
    logger
        .info()
        .with_fields(json!({ "credit_card": "123", "amount": 10.5 }))
        .send();

    let record = out.single();
    assert_eq!(record["credit_card"], "123");
    assert_eq!(record["amount"], 10.5);
    assert_eq!(record["message"], "");
}

#[test]
fn keyed_array_elements_are_masked() {
    let (logger, out) = capture(&config(true, &[]));
    logger
        .info()
        .with_field("users", json!([{ "password": "x" }, { "username": "y" }, "plain"]))
        .msg("batch");

    assert_eq!(
        out.single()["users"],
        json!([{ "password": "***" }, { "username": "y" }, "plain"])
    );
}

#[test]
fn sensitive_key_hides_whole_value() {
    let (logger, out) = capture(&config(true, &[]));
    logger
        .warn()
        .with_field("Authorization", json!({ "scheme": "Bearer", "token": "abc" }))
        .with_field("PASSWORD", "hunter2")
        .msg("auth");

    let record = out.single();
    assert_eq!(record["Authorization"], "***");
    assert_eq!(record["PASSWORD"], "***");
}

#[test]
fn configured_names_match_case_insensitively() {
    let (logger, out) = capture(&config(true, &["lastName"]));
    logger
        .info()
        .with_fields(json!({ "LASTNAME": "Doe", "lastname": "Doe", "city": "Oslo" }))
        .msg("profile");

    let record = out.single();
    assert_eq!(record["LASTNAME"], "***");
    assert_eq!(record["lastname"], "***");
    assert_eq!(record["city"], "Oslo");
}

#[test]
fn structs_are_masked_after_conversion() {
    #[derive(Serialize)]
    struct Card {
        cardno: String,
        cvv: String,
        brand: String,
    }

    #[derive(Serialize)]
    struct Payment {
        id: u64,
        card: Card,
    }

    let (logger, out) = capture(&config(true, &[]));
    let payment = Payment {
        id: 42,
        card: Card {
            cardno: "4111111111111111".into(),
            cvv: "123".into(),
            brand: "visa".into(),
        },
    };
    logger.info().with_fields(&payment).msg("paid");

    let record = out.single();
    assert_eq!(record["id"], 42);
    assert_eq!(
        record["card"],
        json!({ "cardno": "***", "cvv": "***", "brand": "visa" })
    );
}

#[test]
fn masking_disabled_writes_values_verbatim() {
    let (logger, out) = capture(&config(false, &["credit_card"]));
    logger
        .info()
        .with_fields(json!({ "password": "P@ssw0rd", "credit_card": "123" }))
        .msg("raw");

    let record = out.single();
    assert_eq!(record["password"], "P@ssw0rd");
    assert_eq!(record["credit_card"], "123");
}

#[test]
fn errors_bypass_masking() {
    let (logger, out) = capture(&config(true, &[]));
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "bad password for name");
    logger.error().with_error(&err).msg("login failed");

    assert_eq!(out.single()["error"], "bad password for name");
}

#[test]
fn records_below_level_are_dropped() {
    let mut cfg = config(true, &[]);
    cfg.level = "WARN".into();
    let (logger, out) = capture(&cfg);

    logger.debug().msg("hidden");
    logger.info().msg("hidden");
    logger.warn().msg("shown");
    logger.error().msg("shown");

    let severities: Vec<_> = out
        .records()
        .iter()
        .map(|record| record["severity"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(severities, ["warn", "error"]);
}

#[test]
fn payload_cannot_overwrite_record_header() {
    let (logger, out) = capture(&config(true, &[]));
    logger
        .error()
        .with_fields(json!({ "severity": "low", "message": "spoof", "timestamp": "x" }))
        .msg("disk failure");

    let record = out.single();
    assert_eq!(record["severity"], "error");
    assert_eq!(record["message"], "disk failure");
    assert_ne!(record["timestamp"], "x");
}
