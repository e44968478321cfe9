//! Workload
//!
//! Request sources for the simulation engine: pagelist trace files,
//! scripted in-memory streams, and the trace generator.

pub mod error;
pub mod gen;
pub mod source;
pub mod trace;

pub use error::WorkloadError;
pub use gen::GenConfig;
pub use source::{RequestSource, ScriptedSource};
pub use trace::TraceSource;
