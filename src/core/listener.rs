//! Registry of unix-domain control sockets bound on behalf of guests.
//!
//! At most one listener exists per path. The registry is an owned value;
//! share it between threads behind an `Arc`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io::{self, ErrorKind};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::config::SocketOwner;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    owner: Option<SocketOwner>,
    listeners: Mutex<HashMap<PathBuf, Arc<UnixListener>>>,
}

impl ListenerRegistry {
    /// Registry whose sockets are chowned to `owner` after binding.
    pub fn new(owner: SocketOwner) -> Self {
        Self {
            owner: Some(owner),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Registry that leaves socket ownership as created by the process.
    pub fn without_chown() -> Self {
        Self::default()
    }

    /// Binds a new listener at `path` and tracks it.
    ///
    /// Fails with [`Error::ListenerExists`] when the path is already tracked;
    /// the existing listener is left alone. A stale socket or regular file at
    /// `path` is removed before binding. A directory is never removed.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<Arc<UnixListener>> {
        let path = path.as_ref();
        let mut listeners = self.lock();
        let slot = match listeners.entry(path.to_path_buf()) {
            Entry::Occupied(_) => {
                return Err(Error::ListenerExists {
                    path: path.to_path_buf(),
                });
            }
            Entry::Vacant(slot) => slot,
        };

        remove_socket_artifact(path).map_err(|source| listener_error(path, source))?;
        let listener = UnixListener::bind(path).map_err(|source| listener_error(path, source))?;
        if let Some(owner) = self.owner {
            if let Err(source) =
                std::os::unix::fs::chown(path, Some(owner.uid), Some(owner.gid))
            {
                drop(listener);
                if let Err(err) = remove_socket_artifact(path) {
                    warn!("failed to remove unowned socket {}: {err}", path.display());
                }
                return Err(listener_error(path, source));
            }
        }

        info!("bound control socket {}", path.display());
        let listener = Arc::new(listener);
        slot.insert(Arc::clone(&listener));
        Ok(listener)
    }

    /// Forgets the listener at `path`, if any, and removes the socket file.
    ///
    /// Succeeds when neither a listener nor a file exists. The registry only
    /// drops its own handle; the listener closes once every clone returned by
    /// [`create`](Self::create) is dropped as well.
    pub fn delete(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut listeners = self.lock();
        if listeners.remove(path).is_some() {
            debug!("released control socket {}", path.display());
        }
        remove_socket_artifact(path).map_err(|source| listener_error(path, source))
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.lock().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<UnixListener>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn listener_error(path: &Path, source: io::Error) -> Error {
    Error::Listener {
        path: path.to_path_buf(),
        source,
    }
}

/// Removes a leftover socket or file at `path`. Directories are refused.
fn remove_socket_artifact(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if metadata.is_dir() {
        return Err(io::Error::new(
            ErrorKind::IsADirectory,
            "refusing to replace a directory with a socket",
        ));
    }
    match fs::remove_file(path) {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}
