use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when parsing a cursor token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("Invalid cursor encoding: {0}")]
    Encoding(String),
    #[error("Malformed cursor: {0}")]
    Malformed(String),
}

/// Continuation marker for a range scan: "resume after this range key".
///
/// A cursor remembers the partition it was issued for and is only valid for
/// scans of that partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    partition_key: String,
    range_key: String,
}

#[derive(Deserialize)]
struct CursorBody {
    pk: String,
    rk: String,
}

impl Cursor {
    pub fn new(partition_key: impl Into<String>, range_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            range_key: range_key.into(),
        }
    }

    /// The partition this cursor was issued for.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// The range key to resume after.
    pub fn range_key(&self) -> &str {
        &self.range_key
    }

    /// Renders the cursor as an opaque, URL-safe token.
    pub fn to_token(&self) -> String {
        let body = serde_json::json!({
            "pk": self.partition_key,
            "rk": self.range_key,
        });
        URL_SAFE_NO_PAD.encode(body.to_string())
    }

    /// Parses a token produced by [`Cursor::to_token`].
    pub fn from_token(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| CursorError::Encoding(e.to_string()))?;
        let body: CursorBody =
            serde_json::from_slice(&bytes).map_err(|e| CursorError::Malformed(e.to_string()))?;
        Ok(Self::new(body.pk, body.rk))
    }
}
