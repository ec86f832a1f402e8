use crate::config::Credentials;
use crate::error::QueryError;
use postgrest::{Builder, Postgrest};
use std::fmt;
use tracing::debug;
use url::Url;

const REST_PATH: &str = "rest/v1";

/// Handle to a hosted Supabase project, backed by the `postgrest` SDK.
pub struct SupabaseClient {
    credentials: Credentials,
    rest: Postgrest,
}

impl SupabaseClient {
    pub fn new(credentials: Credentials) -> Self {
        let rest = Postgrest::new(rest_url(credentials.url()))
            .insert_header("apikey", credentials.service_role_key());
        debug!(url = %credentials.url(), "supabase client constructed");
        Self { credentials, rest }
    }

    /// Start an authenticated query against `table`.
    ///
    /// The project URL is checked here rather than at construction, so a
    /// malformed URL surfaces as a query failure.
    pub fn from(&self, table: &str) -> Result<Builder, QueryError> {
        let base = self.credentials.url();
        if Url::parse(base)?.cannot_be_a_base() {
            return Err(QueryError::InvalidBaseUrl(base.to_string()));
        }
        Ok(self
            .rest
            .from(table)
            .auth(self.credentials.service_role_key()))
    }

    pub fn url(&self) -> &str {
        self.credentials.url()
    }

    pub fn rest_url(&self) -> String {
        rest_url(self.credentials.url())
    }
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

fn rest_url(base: &str) -> String {
    format!("{}/{REST_PATH}", base.trim_end_matches('/'))
}
