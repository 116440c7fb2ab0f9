// Batch evaluation: the host layer around the matching engine.
// Owns ingestion, summaries and failure isolation; the engine itself stays pure.

pub mod handlers;
pub mod models;
pub mod orchestrator;
