//! High-level operations shared by the CLI and library callers.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::error::{Error, Result};

use super::guest::Guest;
use super::launcher::{LaunchOutcome, Launcher};
use super::listener::ListenerRegistry;
use super::store::GuestStore;

/// Saves a new guest definition and returns where it was written.
pub fn create_guest(store: &GuestStore, guest: &mut Guest) -> Result<PathBuf> {
    store.save(guest)
}

/// Loads a guest and renders its argument vector without launching it.
pub fn render_guest(store: &GuestStore, name: &str) -> Result<Vec<String>> {
    let mut guest = store.load(name)?;
    Ok(guest.to_args())
}

pub fn list_guests(store: &GuestStore) -> Result<Vec<String>> {
    store.list()
}

/// Loads and launches a guest, blocking until the emulator exits.
///
/// For a unix QMP endpoint the socket directory is created first. When the
/// emulator connects to the socket as a client, the socket is claimed in
/// `registry` before the launch. The claim is released after exit unless
/// the guest daemonizes, in which case the caller owns the release.
pub fn start_guest(
    store: &GuestStore,
    launcher: &dyn Launcher,
    registry: &ListenerRegistry,
    name: &str,
) -> Result<LaunchOutcome> {
    let mut guest = store.load(name)?;
    let claimed = prepare_qmp_socket(&guest, registry)?;

    let outcome = launcher.launch(&mut guest);

    if let Some(path) = claimed.filter(|_| !guest.daemonize) {
        if let Err(err) = registry.delete(&path) {
            warn!("failed to release control socket {}: {err}", path.display());
        }
    }
    outcome
}

fn prepare_qmp_socket(guest: &Guest, registry: &ListenerRegistry) -> Result<Option<PathBuf>> {
    let Some(qmp) = guest.qmp.as_ref() else {
        return Ok(None);
    };
    let Some(path) = qmp.unix_socket_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Listener {
            path: path.clone(),
            source,
        })?;
    }
    if qmp.serve {
        return Ok(None);
    }
    registry.create(&path)?;
    info!(
        "claimed control socket {} for guest `{}`",
        path.display(),
        guest.name
    );
    Ok(Some(path))
}
