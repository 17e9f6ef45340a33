//! Savora: a grounded restaurant-assistant backend.
//!
//! Restaurant records are synthesized into typed search documents and
//! loaded into a vector index once at startup; at query time a lexical
//! classifier routes dining questions through retrieval and context
//! assembly before generation, and everything else straight to the
//! ungrounded prompt.

pub mod catalog;
pub mod core;
pub mod history;
pub mod llm;
pub mod logging;
pub mod prompts;
pub mod query;
pub mod rag;
pub mod server;
pub mod state;
