//! Core application primitives (poll loop runtime and scheduling)

pub mod runtime;
pub mod scheduler;

pub use runtime::Monitor;
pub use scheduler::{Cycle, RepeatingTask, StopSignal};
