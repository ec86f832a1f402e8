pub mod config;
pub mod error;
pub mod service;
pub mod supabase;
pub mod types;

pub use config::{Config, Credentials};
pub use error::{ConfigError, ProbeError, QueryError};
pub use service::probe::{ConnectivityProbe, ProbeOutcome};
pub use supabase::SupabaseClient;
