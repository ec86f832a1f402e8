//! Supabase REST access on top of the `postgrest` SDK.
//!
//! Layout:
//! - `client.rs`: the client handle built from validated credentials
//! - `query.rs`: runs a prepared query and maps the reply into crate types

pub mod client;
pub mod query;

pub use client::SupabaseClient;
pub use query::fetch_rows;
