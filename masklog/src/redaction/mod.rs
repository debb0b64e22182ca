//! Payload conversion and masking.
//!
//! - **`convert`**: turns any `Serialize` value into the closed `serde_json::Value`
//!   variant set (scalar, object, array) the masking engine works on.
//! - **`mask`**: walks that value and replaces sensitive keys with the marker.
//!
//! Which names are sensitive lives in `crate::classification`.

mod convert;
mod mask;

pub use convert::{to_fields, to_value};
pub use mask::{mask_fields, mask_value, REDACTED_MARKER};
