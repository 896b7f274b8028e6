mod error;
mod extract;
mod types;

pub use error::AttributeError;
pub use extract::{
    bool_or_default, get_bool, get_int, get_optional_bool, get_optional_int, get_optional_string,
    get_string, int_or_default, string_or_default, INT_SENTINEL,
};
pub use types::{AttributeMap, AttributeValue};
