//! Signal derivation: crossover rules and the per-symbol engine state.

pub mod engine;
pub mod evaluator;

pub use engine::EngineState;
pub use evaluator::{SignalEvaluator, SignalThresholds};
