//! Stack notification and audit pipeline

pub mod audit;
pub mod compose;
pub mod handler;
pub mod router;

// Re-export the main handler for convenience
pub use handler::handler;
pub use router::{InboundEvent, Router};
