//! Network layer - backend calls
//!
//! The Network actor receives commands from the App layer and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ApiError, QuizClient};
