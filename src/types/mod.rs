//! Wire types shared across the crate.

pub mod postgrest;
