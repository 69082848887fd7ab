use crate::constants::SESSION_FILE_NAME;
use crate::models::{AuthSession, User};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// On-disk form of the session
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    session: AuthSession,
    saved_at: DateTime<Utc>,
}

/// Holds the signed-in user and token, and mirrors them to disk so a restart
/// lands straight in the authenticated area.
///
/// Persistence failures never block a state change; they are logged.
#[derive(Debug)]
pub struct SessionStore {
    session: Option<AuthSession>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        SessionStore {
            session: None,
            path: None,
        }
    }

    /// Restore the session saved in `dir`, if any
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SESSION_FILE_NAME);
        let session = match Self::read(&path) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                None
            }
        };

        if let Some(s) = &session {
            tracing::info!(user = %s.user.email, "Restored session");
        }

        SessionStore {
            session,
            path: Some(path),
        }
    }

    fn read(path: &Path) -> Result<Option<AuthSession>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let persisted: PersistedSession = serde_yaml::from_str(&content)?;
        Ok(Some(persisted.session))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Unauthenticated -> Authenticated
    pub fn sign_in(&mut self, session: AuthSession) {
        tracing::info!(user = %session.user.email, "Signed in");
        self.session = Some(session);
        self.save();
    }

    /// Replace the stored user with a server-confirmed snapshot
    pub fn update_user_profile(&mut self, user: User) {
        match &mut self.session {
            Some(session) => {
                session.user = user;
                self.save();
            }
            None => tracing::warn!("Profile update ignored: no active session"),
        }
    }

    /// Authenticated -> Unauthenticated
    pub fn sign_out(&mut self) {
        self.session = None;
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove session file");
                }
            }
        }
        tracing::info!("Signed out");
    }

    fn save(&self) {
        if let Err(e) = self.write() {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }

    fn write(&self) -> Result<()> {
        let (Some(path), Some(session)) = (&self.path, &self.session) else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let persisted = PersistedSession {
            session: session.clone(),
            saved_at: Utc::now(),
        };
        let yaml = serde_yaml::to_string(&persisted)?;

        // The file carries the bearer token: owner-only access
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session() -> AuthSession {
        AuthSession {
            user: User {
                id: "1".to_string(),
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                avatar: None,
                role: None,
            },
            token: "token-123".to_string(),
            refresh_token: None,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut store = SessionStore::in_memory();
        assert!(!store.is_authenticated());

        store.sign_in(session());
        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("token-123"));
        assert_eq!(store.user().map(|u| u.name.as_str()), Some("Ana"));

        store.sign_out();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::load(dir.path());
        store.sign_in(session());

        let mut user = store.user().unwrap().clone();
        user.avatar = Some("ana.png".to_string());
        store.update_user_profile(user);

        let restored = SessionStore::load(dir.path());
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().unwrap().avatar.as_deref(), Some("ana.png"));

        let mut restored = restored;
        restored.sign_out();
        assert!(!dir.path().join(SESSION_FILE_NAME).exists());
        assert!(!SessionStore::load(dir.path()).is_authenticated());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE_NAME);
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = SessionStore::load(dir.path());
        store.sign_in(session());

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode {:o}", mode & 0o777);
        assert!(fs::read_to_string(&path).unwrap().contains("token-123"));
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILE_NAME), "not: [valid").unwrap();
        assert!(!SessionStore::load(dir.path()).is_authenticated());
    }

    #[test]
    fn test_profile_update_without_session_is_ignored() {
        let mut store = SessionStore::in_memory();
        store.update_user_profile(session().user);
        assert!(!store.is_authenticated());
    }
}
