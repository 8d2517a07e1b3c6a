//! Core Harbor library (daemon status probing).

pub mod docker;
pub mod probe;

pub use probe::{DaemonInfo, DaemonProbe, PROBE_TIMEOUT};
