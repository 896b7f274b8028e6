mod document;
mod error;
mod traits;

pub use document::{attribute_to_json, json_to_attribute, SerdeConverter};
pub use error::ConversionError;
pub use traits::ModelConverter;
