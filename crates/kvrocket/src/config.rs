use std::env;

use kvrocket_core::storage::ScanPolicy;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region (default: "us-east-2")
    pub region: String,
    /// Static access key id. When absent the default AWS credential chain is used.
    pub access_key_id: Option<String>,
    /// Static secret key, paired with `access_key_id`.
    pub secret_key: Option<String>,
    /// Custom endpoint URL (for local DynamoDB)
    pub endpoint_url: Option<String>,
    /// Table holding the records (default: "kvrocket")
    pub table_name: String,
    /// Default page size for listings (default: 25)
    pub page_size: u32,
    /// What listings do with unreadable items (default: lenient)
    pub scan_policy: ScanPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGION` - AWS region (default: "us-east-2")
    /// - `ACCESS_KEY_ID` - Static access key id (optional)
    /// - `SECRET_KEY` - Static secret key (optional)
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (optional)
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "kvrocket")
    /// - `KVROCKET_PAGE_SIZE` - Listing page size (default: 25)
    /// - `KVROCKET_SCAN_POLICY` - "lenient" or "strict" (default: "lenient")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Unparseable numbers and policies fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            region: var("REGION").unwrap_or_else(|| "us-east-2".to_string()),
            access_key_id: var("ACCESS_KEY_ID"),
            secret_key: var("SECRET_KEY"),
            endpoint_url: var("AWS_ENDPOINT_URL"),
            table_name: var("DYNAMODB_TABLE_NAME").unwrap_or_else(|| "kvrocket".to_string()),
            page_size: var("KVROCKET_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(25),
            scan_policy: var("KVROCKET_SCAN_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Whether both halves of a static credential pair are configured.
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Creates a DynamoDB client with the given configuration.
///
/// Static credentials are used when both `ACCESS_KEY_ID` and `SECRET_KEY` are
/// set; otherwise the SDK's default provider chain applies.
#[cfg(feature = "dynamodb")]
pub async fn create_client(config: &Config) -> aws_sdk_dynamodb::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key_id), Some(secret_key)) = (&config.access_key_id, &config.secret_key) {
        loader = loader.credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
            access_key_id,
            secret_key,
            None,
            None,
            "kvrocket-static",
        ));
    }

    let sdk_config = loader.load().await;
    aws_sdk_dynamodb::Client::new(&sdk_config)
}
