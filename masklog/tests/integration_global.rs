//! The process-wide logger. Kept in its own test binary so no other test
//! initializes it first.

use std::ptr;

use masklog::{Config, Level, MaskingConfig};

#[test]
fn second_init_returns_first_instance() {
    let first = masklog::init(&Config {
        app_name: "first".into(),
        level: "warn".into(),
        masking: MaskingConfig {
            enabled: true,
            sensitive_fields: vec!["iban".into()],
        },
        caller_enable: false,
    });
    let second = masklog::init(&Config {
        level: "trace".into(),
        ..Config::default()
    });

    assert!(ptr::eq(first, second));
    assert!(ptr::eq(first, masklog::logger()));
    assert_eq!(second.level(), Level::Warn);
    assert!(second.masking_enabled());
    assert!(second.classifier().is_sensitive("IBAN"));

    // Below the configured level, so nothing reaches stdout.
    masklog::debug().with_field("iban", "NO93 8601 1117 947").msg("ignored");
    assert_eq!(masklog::warn().level(), Level::Warn);
}
