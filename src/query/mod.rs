//! Query-side pipeline: lexical classification and per-turn orchestration.

pub mod classifier;
pub mod processor;

pub use classifier::is_domain_relevant;
pub use processor::QueryProcessor;
