//! # GymTrack TUI
//!
//! A terminal client for the GymTrack fitness API.
//!
//! ## Features
//! - Sign in, create an account, sign out (session restored on restart)
//! - Browse exercises by muscle group
//! - Mark exercises as completed and review the history by day
//! - Edit the profile, change the password, upload a profile photo
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod error;
pub mod media;
pub mod models;
pub mod validation;
pub mod session;
pub mod navigation;
pub mod workflow;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use models::{AuthSession, Exercise, HistoryDay, HistoryEntry, User};
pub use session::SessionStore;
pub use navigation::{AppRoute, AppTab, AuthRoute, Navigator, Route};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, NetworkActor};
