//! `slog` plumbing: the drains records are written through and the `KV` that
//! carries masked fields into them.
//!
//! This module is responsible for:
//! - Writing one JSON object per record, with `timestamp`, `severity` and
//!   `message` first and the record's fields after them. Fields cannot
//!   replace those three.
//! - Filtering by [`Level`], including `fatal` and `panic`, which `slog` alone
//!   cannot tell apart.
//! - Never failing a log call: I/O and serialization errors surface as the
//!   drain's `Err` and are discarded by the logger with `ignore_res`.
//!
//! It does not mask anything; fields reach it already masked.

use std::{
    fmt,
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use chrono::{Local, SecondsFormat};
use serde_json::{Map, Number, Value as JsonValue};
use slog::{Drain, Key, OwnedKVList, Record, Serializer, KV};

use crate::level::Level;

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const SEVERITY_KEY: &str = "severity";
pub const MESSAGE_KEY: &str = "message";

/// A `slog::Drain` that writes records as newline-delimited JSON.
///
/// Writes are serialized through a mutex, so one record is always one
/// uninterrupted line. A poisoned lock is recovered rather than reported.
pub struct JsonDrain<W> {
    out: Mutex<W>,
}

impl<W: Write> JsonDrain<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn render(record: &Record<'_>, values: &OwnedKVList) -> io::Result<Vec<u8>> {
        let mut fields = Map::new();
        fields.insert(
            TIMESTAMP_KEY.to_owned(),
            JsonValue::String(Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)),
        );
        fields.insert(
            SEVERITY_KEY.to_owned(),
            JsonValue::String(Level::of(record).as_str().to_owned()),
        );
        fields.insert(
            MESSAGE_KEY.to_owned(),
            JsonValue::String(record.msg().to_string()),
        );

        let mut serializer = MapSerializer { fields };
        record.kv().serialize(record, &mut serializer)?;
        values.serialize(record, &mut serializer)?;

        let mut line = serde_json::to_vec(&serializer.fields)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl<W> Drain for JsonDrain<W>
where
    W: Write + Send,
{
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> io::Result<()> {
        let line = Self::render(record, values)?;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(&line)?;
        out.flush()
    }

    // Level decisions belong to `SeverityFilter`, not to slog's compile-time cap.
    fn is_enabled(&self, _level: slog::Level) -> bool {
        true
    }
}

impl<W> fmt::Debug for JsonDrain<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDrain").finish_non_exhaustive()
    }
}

const HEADER_KEYS: [&str; 3] = [TIMESTAMP_KEY, SEVERITY_KEY, MESSAGE_KEY];

/// Collects serialized key-value pairs into a JSON map.
///
/// Later pairs win over earlier ones with the same key. Pairs named like a
/// header field are dropped; the record's own header always stands.
struct MapSerializer {
    fields: Map<String, JsonValue>,
}

impl MapSerializer {
    fn put(&mut self, key: Key, value: JsonValue) -> slog::Result {
        let key: &str = key.as_ref();
        if !HEADER_KEYS.contains(&key) {
            self.fields.insert(key.to_owned(), value);
        }
        Ok(())
    }
}

impl Serializer for MapSerializer {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments<'_>) -> slog::Result {
        self.put(key, JsonValue::String(val.to_string()))
    }

    fn emit_str(&mut self, key: Key, val: &str) -> slog::Result {
        self.put(key, JsonValue::String(val.to_owned()))
    }

    fn emit_bool(&mut self, key: Key, val: bool) -> slog::Result {
        self.put(key, JsonValue::Bool(val))
    }

    fn emit_i64(&mut self, key: Key, val: i64) -> slog::Result {
        self.put(key, JsonValue::from(val))
    }

    fn emit_u64(&mut self, key: Key, val: u64) -> slog::Result {
        self.put(key, JsonValue::from(val))
    }

    fn emit_f64(&mut self, key: Key, val: f64) -> slog::Result {
        self.put(key, JsonValue::from(val))
    }

    fn emit_unit(&mut self, key: Key) -> slog::Result {
        self.put(key, JsonValue::Null)
    }

    fn emit_none(&mut self, key: Key) -> slog::Result {
        self.put(key, JsonValue::Null)
    }

    fn emit_serde(&mut self, key: Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let value = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.put(key, value)
    }
}

/// Drops records below a minimum [`Level`].
///
/// Works like `slog::LevelFilter`, but reads the record tag so `fatal` records
/// can be dropped while `panic` records pass.
#[derive(Debug)]
pub struct SeverityFilter<D> {
    drain: D,
    min: Level,
}

impl<D> SeverityFilter<D> {
    pub fn new(drain: D, min: Level) -> Self {
        Self { drain, min }
    }
}

impl<D: Drain> Drain for SeverityFilter<D> {
    type Ok = Option<D::Ok>;
    type Err = D::Err;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        if Level::of(record) >= self.min {
            self.drain.log(record, values).map(Some)
        } else {
            Ok(None)
        }
    }

    fn is_enabled(&self, level: slog::Level) -> bool {
        Level::from_slog(level) >= self.min && self.drain.is_enabled(level)
    }
}

/// Serializes a masked field map as top-level record fields.
///
/// Scalars go through the typed `emit_*` calls; objects and arrays are emitted
/// as nested values.
pub(crate) struct FieldsKv<'a>(pub(crate) &'a Map<String, JsonValue>);

impl KV for FieldsKv<'_> {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        for (name, value) in self.0 {
            let key = Key::from(name.clone());
            match value {
                JsonValue::Null => serializer.emit_none(key)?,
                JsonValue::Bool(value) => serializer.emit_bool(key, *value)?,
                JsonValue::Number(number) => emit_number(serializer, key, number)?,
                JsonValue::String(value) => serializer.emit_str(key, value)?,
                nested => {
                    slog::Value::serialize(&slog::Serde(nested.clone()), record, key, serializer)?;
                }
            }
        }
        Ok(())
    }
}

fn emit_number(serializer: &mut dyn Serializer, key: Key, number: &Number) -> slog::Result {
    if let Some(value) = number.as_i64() {
        serializer.emit_i64(key, value)
    } else if let Some(value) = number.as_u64() {
        serializer.emit_u64(key, value)
    } else {
        serializer.emit_f64(key, number.as_f64().unwrap_or_default())
    }
}
