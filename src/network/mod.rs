//! Network layer - API client and the actor executing its calls
//!
//! The Network actor receives API commands and sends back typed responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::ApiClient;
