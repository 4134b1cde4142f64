// All feedback processing is in pitchlens-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod evaluation_client;
pub mod render;

// Re-export core types for convenience
pub use pitchlens_core::*;

// Re-export CLI utilities
pub use evaluation_client::EvaluationClient;
