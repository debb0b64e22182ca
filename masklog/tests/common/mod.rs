//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use masklog::{Config, Logger, MaskingConfig};
use serde_json::Value as JsonValue;

/// An in-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    /// Every record written so far, parsed.
    pub fn records(&self) -> Vec<JsonValue> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// The only record written so far.
    pub fn single(&self) -> JsonValue {
        let mut records = self.records();
        assert_eq!(records.len(), 1, "expected exactly one record: {records:?}");
        records.remove(0)
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn config(masking: bool, sensitive_fields: &[&str]) -> Config {
    Config {
        app_name: "MyApp".into(),
        level: "trace".into(),
        masking: MaskingConfig {
            enabled: masking,
            sensitive_fields: sensitive_fields.iter().map(|&name| name.to_owned()).collect(),
        },
        caller_enable: false,
    }
}

/// A logger over `config` writing into a fresh capture.
pub fn capture(config: &Config) -> (Logger, Capture) {
    let capture = Capture::default();
    let logger = Logger::builder(config).writer(capture.clone()).build();
    (logger, capture)
}
