use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Session, SessionResult};

/// Where a session is kept between runs
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any
    fn load(&self) -> SessionResult<Option<Session>>;

    /// Persist the session, replacing any previous one
    fn save(&self, session: &Session) -> SessionResult<()>;

    /// Remove the persisted session. Must succeed when nothing is stored.
    fn clear(&self) -> SessionResult<()>;
}

/// In-process store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing session already stored
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Option<Session>> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves a half-written session
        let tmp = self.path.with_extension("json.tmp");
        let mut file = open_private(&tmp)?;
        file.write_all(&serde_json::to_vec_pretty(session)?)?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open `path` for writing, readable by the owner only
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // The mode above only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionError, UserIdentity};
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&Session::authenticated("tok", None)).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token.as_deref(), Some("tok"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileSessionStore::new(&path);
            let user = UserIdentity::new("u1", "ward@hospital.org").name("Ward Admin");
            store.save(&Session::authenticated("abc", Some(user))).unwrap();
        }

        let store = FileSessionStore::new(&path);
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user.unwrap().display_name(), "Ward Admin");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Serialization(_))));
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store.save(&Session::authenticated("abc", None)).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        // A leftover temp file with loose permissions must not leak its mode
        std::fs::write(path.with_extension("json.tmp"), "").unwrap();
        std::fs::set_permissions(
            path.with_extension("json.tmp"),
            std::fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        let store = FileSessionStore::new(&path);
        store.save(&Session::authenticated("secret", None)).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
