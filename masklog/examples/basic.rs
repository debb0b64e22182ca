//! Logs a few records to stdout: nested masking, a bound context and a query.
//!
//! ```sh
//! cargo run -p masklog --example basic
//! ```

use std::time::Instant;

use masklog::{Config, Context, MaskingConfig, QueryLogger};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Customer {
    firstname: String,
    lastname: String,
    passport: Passport,
    tier: &'static str,
}

#[derive(Serialize)]
struct Passport {
    passportno: String,
    country: &'static str,
}

fn main() {
    let config = Config {
        app_name: "billing".into(),
        level: "trace".into(),
        masking: MaskingConfig {
            enabled: true,
            sensitive_fields: vec!["iban".into()],
        },
        caller_enable: true,
    };
    masklog::init(&config);

    let ctx = Context::new()
        .with_trace_id("4bf92f3577b34da6")
        .with_request_id("req-1029");

    let customer = Customer {
        firstname: "Ada".into(),
        lastname: "Lovelace".into(),
        passport: Passport {
            passportno: "X1234567".into(),
            country: "GB",
        },
        tier: "gold",
    };

    masklog::info()
        .with_field("customer", &customer)
        .with_fields(json!({ "IBAN": "GB33BUKB20201555555555", "amount": 120.5 }))
        .with_context(&ctx)
        .msg("invoice created");

    masklog::debug()
        .with_field("lines", json!([{ "password": "x" }, { "sku": "A-1" }]))
        .send();

    let queries = QueryLogger::new(&config);
    let begin = Instant::now();
    queries.trace(
        &ctx,
        begin,
        || ("SELECT id FROM invoices WHERE customer = $1".to_owned(), 3),
        None,
    );
}
