use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};

use super::guest::Guest;

pub const GUEST_FILE_EXTENSION: &str = "toml";

/// Guest definitions stored as `<data_dir>/<name>.toml`.
#[derive(Debug, Clone)]
pub struct GuestStore {
    data_dir: PathBuf,
}

impl GuestStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Definition file for `name`, which must be a single plain path component.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.data_dir.join(format!("{name}.{GUEST_FILE_EXTENSION}")))
    }

    /// Writes a new guest definition, assigning a UUID first if needed.
    ///
    /// Never overwrites: an existing file yields [`Error::AlreadyExists`] and
    /// is left untouched.
    pub fn save(&self, guest: &mut Guest) -> Result<PathBuf> {
        let path = self.path_for(&guest.name)?;
        if path.exists() {
            return Err(Error::AlreadyExists { path });
        }

        guest.ensure_uuid();
        let contents = toml::to_string_pretty(guest).map_err(|source| Error::EncodeGuest {
            name: guest.name.clone(),
            source,
        })?;

        fs::create_dir_all(&self.data_dir).map_err(|source| Error::WriteGuest {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => Error::AlreadyExists { path: path.clone() },
                _ => Error::WriteGuest {
                    path: path.clone(),
                    source,
                },
            })?;
        file.write_all(contents.as_bytes())
            .map_err(|source| Error::WriteGuest {
                path: path.clone(),
                source,
            })?;

        info!("saved guest `{}` to {}", guest.name, path.display());
        Ok(path)
    }

    /// Loads the guest named `name` from the data directory.
    pub fn load(&self, name: &str) -> Result<Guest> {
        load_guest_from_path(&self.path_for(name)?)
    }

    /// Names of every guest definition in the data directory, sorted.
    ///
    /// A missing data directory is treated as empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::ListDir {
                    path: self.data_dir.clone(),
                    source,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::ListDir {
                path: self.data_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(GUEST_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('/') {
        "name contains `/`"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else if name.contains("..") {
        "name contains `..`"
    } else if name.starts_with('.') {
        "name starts with `.`"
    } else {
        return Ok(());
    };
    Err(Error::InvalidGuestName {
        name: name.to_string(),
        reason,
    })
}

/// Loads a guest definition from an explicit path.
pub fn load_guest_from_path(path: &Path) -> Result<Guest> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadGuest {
        path: path.to_path_buf(),
        source,
    })?;
    let guest: Guest = toml::from_str(&contents).map_err(|source| Error::DecodeGuest {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded guest `{}` from {}", guest.name, path.display());
    Ok(guest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::EngineArch;
    use crate::core::memory::MemoryOptions;
    use tempfile::tempdir;

    #[test]
    fn path_is_derived_from_name() {
        let store = GuestStore::new("data");
        assert_eq!(
            store.path_for("web").unwrap(),
            PathBuf::from("data/web.toml")
        );
    }

    #[test]
    fn unsafe_names_are_rejected_before_touching_disk() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let store = GuestStore::new(&data);

        for name in ["", "../escaped", "a/b", "..", "nul\0name", ".hidden"] {
            let mut guest = Guest::new(name, EngineArch::X86_64);
            assert!(
                matches!(store.save(&mut guest), Err(Error::InvalidGuestName { .. })),
                "save accepted {name:?}"
            );
            assert!(
                matches!(store.load(name), Err(Error::InvalidGuestName { .. })),
                "load accepted {name:?}"
            );
        }
        assert!(!dir.path().join("escaped.toml").exists());
        assert!(!data.exists());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn save_creates_data_dir_and_assigns_uuid() {
        let dir = tempdir().unwrap();
        let store = GuestStore::new(dir.path().join("nested/data"));
        let mut guest = Guest::new("alpha", EngineArch::Riscv64);
        guest.memory = Some(MemoryOptions::new(256));

        let path = store.save(&mut guest).unwrap();
        assert!(path.is_file());
        assert!(!guest.uuid.is_empty());

        let loaded = store.load("alpha").unwrap();
        assert_eq!(loaded, guest);
    }

    #[test]
    fn largest_memory_sizes_survive_a_save() {
        let dir = tempdir().unwrap();
        let store = GuestStore::new(dir.path());
        let mut guest = Guest::new("big", EngineArch::X86_64);
        guest.memory = Some(MemoryOptions {
            size: u32::MAX,
            slots: String::new(),
            maxmem: u32::MAX,
        });

        store.save(&mut guest).unwrap();
        assert_eq!(store.load("big").unwrap().memory, guest.memory);
    }

    #[test]
    fn engine_is_decoded_into_the_guest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arm.toml");
        fs::write(&path, "name = \"arm\"\nengine = \"QEMU-SYSTEM-ARM\"\n").unwrap();
        let guest = load_guest_from_path(&path).unwrap();
        assert_eq!(guest.engine, EngineArch::Arm);
    }

    #[test]
    fn unknown_engine_fails_decoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "name = \"bad\"\nengine = \"qemu-system-z80\"\n").unwrap();
        let err = load_guest_from_path(&path).unwrap_err();
        match err {
            Error::DecodeGuest { source, .. } => {
                assert!(source.to_string().contains("qemu-system-z80"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let store = GuestStore::new(dir.path());
        match store.load("ghost").unwrap_err() {
            Error::ReadGuest { source, .. } => assert_eq!(source.kind(), ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn list_returns_sorted_guest_names() {
        let dir = tempdir().unwrap();
        let store = GuestStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());

        for name in ["zulu", "alpha"] {
            store
                .save(&mut Guest::new(name, EngineArch::X86_64))
                .unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "zulu"]);
    }

    #[test]
    fn list_of_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let store = GuestStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }
}
