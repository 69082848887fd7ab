//! Media references and avatar files
//!
//! The API stores only file names for avatars and exercise media. Full URLs are
//! built here by joining the API base URL with a fixed path segment, so callers
//! always pass the bare reference.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{PHOTO_BYTE_SIZE, PHOTO_MB_SIZE};

fn media_url(base_url: &str, segment: &str, reference: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), segment, reference)
}

pub fn avatar_url(base_url: &str, avatar: &str) -> String {
    media_url(base_url, "avatar", avatar)
}

pub fn exercise_demo_url(base_url: &str, demo: &str) -> String {
    media_url(base_url, "exercise/demo", demo)
}

pub fn exercise_thumb_url(base_url: &str, thumb: &str) -> String {
    media_url(base_url, "exercise/thumb", thumb)
}

/// Reasons an avatar is refused before upload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("The image is too large, pick one up to {limit_mb}MB.")]
    TooLarge { size: u64, limit_mb: u64 },
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Not a regular file: {0}")]
    NotAFile(String),
    #[error("Pick an image file with an extension (.png, .jpg, ...)")]
    MissingExtension,
}

/// A local image that passed the pre-upload checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub path: PathBuf,
    /// Multipart file name, derived from the user's name
    pub file_name: String,
    pub mime: String,
    pub size: u64,
}

impl AvatarFile {
    /// Check size and extension of the file at `path` and derive its upload name.
    pub fn inspect(path: &Path, user_name: &str) -> Result<Self, AvatarError> {
        let display = path.display().to_string();
        let meta = fs::metadata(path).map_err(|_| AvatarError::NotFound(display.clone()))?;
        if !meta.is_file() {
            return Err(AvatarError::NotAFile(display));
        }

        let size = meta.len();
        if size > PHOTO_BYTE_SIZE {
            return Err(AvatarError::TooLarge {
                size,
                limit_mb: PHOTO_MB_SIZE,
            });
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or(AvatarError::MissingExtension)?;

        let file_name = format!("{}.{}", user_name, ext)
            .to_lowercase()
            .trim()
            .replace(' ', "_");

        Ok(AvatarFile {
            path: path.to_path_buf(),
            file_name,
            mime: format!("image/{}", ext),
            size,
        })
    }
}

/// Expand `~` or a leading `~/` to the home directory. `~user` is left alone.
pub fn expand_home(input: &str) -> PathBuf {
    let rest = if input == "~" {
        None
    } else if let Some(rest) = input.strip_prefix("~/") {
        Some(rest)
    } else {
        return PathBuf::from(input);
    };
    match (dirs::home_dir(), rest) {
        (Some(home), None) => home,
        (Some(home), Some(rest)) => home.join(rest),
        (None, _) => PathBuf::from(input),
    }
}
