pub mod probe;
pub mod shared;

pub use probe::{probe, CredentialProbe, ProbeOutcome};
