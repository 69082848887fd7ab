//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Default base URL of the GymTrack API
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under $HOME holding config, session and log
pub const CONFIG_DIR_NAME: &str = ".gymtrack";

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const SESSION_FILE_NAME: &str = "session.yaml";
pub const LOG_FILE_NAME: &str = "gymtrack.log";

/// Muscle group selected when the home screen first mounts
pub const DEFAULT_GROUP: &str = "antebraço";

/// Minimum password length accepted by every form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Avatar upload limit
pub const PHOTO_MB_SIZE: u64 = 5;
pub const PHOTO_BYTE_SIZE: u64 = PHOTO_MB_SIZE * 1024 * 1024;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// Application name
pub const APP_NAME: &str = "GymTrack";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// Fallback toast titles, used when the server gave no message

pub const FALLBACK_SIGN_IN: &str = "Could not sign in. Try again.";
pub const FALLBACK_SIGN_UP: &str = "Could not create the account, try again later.";
pub const FALLBACK_GROUPS: &str = "Could not load the muscle groups";
pub const FALLBACK_EXERCISES: &str = "Could not load the exercises for this muscle group";
pub const FALLBACK_EXERCISE_DETAILS: &str = "Could not load the exercise details";
pub const FALLBACK_REGISTER_HISTORY: &str = "Could not register the exercise";
pub const FALLBACK_HISTORY: &str = "Could not load the history";
pub const FALLBACK_PROFILE_UPDATE: &str = "Could not update the profile, try again later.";
pub const FALLBACK_AVATAR_UPLOAD: &str = "Could not update the photo, try again later.";

pub const SUCCESS_REGISTER_HISTORY: &str = "Congratulations! Exercise registered in your history";
pub const SUCCESS_PROFILE_UPDATE: &str = "Profile updated successfully!";
pub const SUCCESS_AVATAR_UPLOAD: &str = "Photo updated successfully!";
pub const SUCCESS_SIGN_UP: &str = "Account created!";
