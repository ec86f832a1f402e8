pub mod probe;

pub use probe::{ConnectivityProbe, ProbeOutcome};
