mod cursor;
mod error;
mod http_mapping;
mod key;
mod traits;
mod types;

pub use cursor::{Cursor, CursorError};
pub use error::{AccessError, Result, StoreError};
pub use http_mapping::access_error_to_status_code;
pub use key::{Key, PARTITION_KEY_ATTR, RANGE_KEY_ATTR};
pub use traits::{KeyValueStore, Repository};
pub use types::{Page, QueryOutput, QueryRequest, ScanPolicy};
