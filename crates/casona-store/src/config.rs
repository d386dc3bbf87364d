// ── Gateway connection configuration ──
//
// Describes *how* to reach the remote store. Credential data and
// transport tuning only -- this crate never reads config files or
// environment variables. `casona-config` builds a `StoreConfig` (or
// decides there is none) and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Connection settings for a remote PostgREST store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL (e.g., `https://abc.supabase.co`).
    pub url: Url,
    /// Anonymous-access API key, used for the standard read/write path.
    pub anon_key: SecretString,
    /// Privileged key for administrative-tier operations. Optional;
    /// never consulted for mode selection or the basic read path.
    pub service_role_key: Option<SecretString>,
    /// Request timeout applied to every call.
    pub timeout: Duration,
}

impl StoreConfig {
    /// A config with the default 30s timeout and no privileged key.
    pub fn new(url: Url, anon_key: SecretString) -> Self {
        Self {
            url,
            anon_key,
            service_role_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}
