//! Evaluator implementations for the crucible consensus engine.
//!
//! - `heuristic`: rule-based panel members driven by the keyword engine
//! - `keyword`: per-dimension green/red flag analysis
//! - `remote`: model-backed evaluators over provider APIs
//! - `prompts`: role prompts for the remote evaluators
//! - `report`: plain-text rendering and JSON export of a verdict

pub mod heuristic;
pub mod keyword;
pub mod prompts;
pub mod remote;
pub mod report;

pub use heuristic::HeuristicEvaluator;
pub use remote::{Provider, RemoteEvaluator};
