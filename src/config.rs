use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_SETTINGS_FILE: &str = "virtkit.toml";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SOCKET_DIR: &str = "sock";
pub const DEFAULT_DISK_DIR: &str = "disks";
pub const DEFAULT_SOCKET_UID: u32 = 1000;
pub const DEFAULT_SOCKET_GID: u32 = 1000;

pub const SETTINGS_ENV: &str = "VIRTKIT_CONFIG";
pub const DATA_DIR_ENV: &str = "VIRTKIT_DATA_DIR";
pub const SOCKET_DIR_ENV: &str = "VIRTKIT_SOCKET_DIR";
pub const DISK_DIR_ENV: &str = "VIRTKIT_DISK_DIR";
pub const EMULATOR_DIR_ENV: &str = "VIRTKIT_EMULATOR_DIR";

/// Numeric owner applied to control sockets after binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketOwner {
    pub uid: u32,
    pub gid: u32,
}

impl Default for SocketOwner {
    fn default() -> Self {
        Self {
            uid: DEFAULT_SOCKET_UID,
            gid: DEFAULT_SOCKET_GID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// File the settings were read from, if any.
    pub file_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub socket_dir: PathBuf,
    pub disk_dir: PathBuf,
    /// Directory holding the `qemu-system-*` binaries; `PATH` lookup when absent.
    pub emulator_dir: Option<PathBuf>,
    pub socket_owner: SocketOwner,
    pub warnings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_path: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            socket_dir: PathBuf::from(DEFAULT_SOCKET_DIR),
            disk_dir: PathBuf::from(DEFAULT_DISK_DIR),
            emulator_dir: None,
            socket_owner: SocketOwner::default(),
            warnings: Vec::new(),
        }
    }
}

impl Settings {
    /// Resolves settings from an explicit file, `$VIRTKIT_CONFIG`, or
    /// `./virtkit.toml` when present, then applies environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let candidate = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(SETTINGS_ENV).map(PathBuf::from));

        let mut settings = match candidate {
            Some(path) => load_settings(&path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    load_settings(&default_path)?
                } else {
                    Settings::default()
                }
            }
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(dir) = non_empty_var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_var(SOCKET_DIR_ENV) {
            self.socket_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_var(DISK_DIR_ENV) {
            self.disk_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_var(EMULATOR_DIR_ENV) {
            self.emulator_dir = Some(PathBuf::from(dir));
        }
    }
}

fn non_empty_var(key: &str) -> Option<OsString> {
    env::var_os(key).filter(|value| !value.is_empty())
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let value: toml::Value = toml::from_str(&contents).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let mut warnings = detect_unknown_fields(&value);

    let raw = RawSettings::deserialize(value).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;

    raw.into_validated(path, &mut warnings)
}

fn invalid_config(path: &Path, message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn detect_unknown_fields(value: &toml::Value) -> Vec<String> {
    let mut warnings = Vec::new();

    if let toml::Value::Table(table) = value {
        warn_table(table, &["paths", "socket_owner"], "root", &mut warnings);

        if let Some(paths) = table.get("paths") {
            if let toml::Value::Table(paths_table) = paths {
                warn_table(
                    paths_table,
                    &["data", "sockets", "disks", "emulators"],
                    "[paths]",
                    &mut warnings,
                );
            } else {
                warnings.push("Expected [paths] to be a table.".to_string());
            }
        }

        if let Some(owner) = table.get("socket_owner") {
            if let toml::Value::Table(owner_table) = owner {
                warn_table(owner_table, &["uid", "gid"], "[socket_owner]", &mut warnings);
            } else {
                warnings.push("Expected [socket_owner] to be a table.".to_string());
            }
        }
    }

    warnings
}

fn warn_table(
    table: &toml::map::Map<String, toml::Value>,
    allowed: &[&str],
    context: &str,
    warnings: &mut Vec<String>,
) {
    for key in table.keys() {
        if !allowed.contains(&key.as_str()) {
            warnings.push(format!(
                "Unknown field `{key}` at {context}; this value will be ignored."
            ));
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawSettings {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    socket_owner: Option<RawSocketOwner>,
}

#[derive(Debug, Deserialize, Default)]
struct RawPaths {
    data: Option<PathBuf>,
    sockets: Option<PathBuf>,
    disks: Option<PathBuf>,
    emulators: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawSocketOwner {
    uid: Option<u32>,
    gid: Option<u32>,
}

impl RawSettings {
    fn into_validated(self, path: &Path, warnings: &mut Vec<String>) -> Result<Settings> {
        let root_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let data_dir = resolve_dir(&root_dir, self.paths.data, DEFAULT_DATA_DIR);
        let socket_dir = resolve_dir(&root_dir, self.paths.sockets, DEFAULT_SOCKET_DIR);
        let disk_dir = resolve_dir(&root_dir, self.paths.disks, DEFAULT_DISK_DIR);

        let emulator_dir = match self.paths.emulators {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err(invalid_config(
                    path,
                    "`paths.emulators` cannot be empty. Remove it to use PATH lookup.",
                ));
            }
            Some(dir) => Some(resolve_path(&root_dir, dir)),
            None => None,
        };

        let socket_owner = match self.socket_owner {
            None => SocketOwner::default(),
            Some(RawSocketOwner { uid, gid }) => {
                if uid.is_none() != gid.is_none() {
                    warnings.push(format!(
                        "[socket_owner] sets only one of `uid`/`gid`; the other defaults to {}.",
                        DEFAULT_SOCKET_UID
                    ));
                }
                SocketOwner {
                    uid: uid.unwrap_or(DEFAULT_SOCKET_UID),
                    gid: gid.unwrap_or(DEFAULT_SOCKET_GID),
                }
            }
        };

        Ok(Settings {
            file_path: Some(path.to_path_buf()),
            data_dir,
            socket_dir,
            disk_dir,
            emulator_dir,
            socket_owner,
            warnings: warnings.clone(),
        })
    }
}

fn resolve_dir(base: &Path, input: Option<PathBuf>, default: &str) -> PathBuf {
    resolve_path(base, input.unwrap_or_else(|| PathBuf::from(default)))
}

fn resolve_path(base: &Path, input: PathBuf) -> PathBuf {
    if input.is_absolute() {
        input
    } else {
        base.join(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("virtkit.toml");
        fs::write(&path, "").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.data_dir, dir.path().join("data"));
        assert_eq!(settings.socket_dir, dir.path().join("sock"));
        assert_eq!(settings.disk_dir, dir.path().join("disks"));
        assert_eq!(settings.emulator_dir, None);
        assert_eq!(settings.socket_owner, SocketOwner { uid: 1000, gid: 1000 });
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn relative_paths_resolve_against_settings_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("virtkit.toml");
        fs::write(
            &path,
            r#"
[paths]
data = "guests"
sockets = "/run/virtkit"
emulators = "bin"

[socket_owner]
uid = 107
gid = 107
"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.data_dir, dir.path().join("guests"));
        assert_eq!(settings.socket_dir, PathBuf::from("/run/virtkit"));
        assert_eq!(settings.emulator_dir, Some(dir.path().join("bin")));
        assert_eq!(settings.socket_owner, SocketOwner { uid: 107, gid: 107 });
    }

    #[test]
    fn unknown_fields_become_warnings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("virtkit.toml");
        fs::write(&path, "color = true\n[paths]\nlogs = \"l\"\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.warnings.len(), 2);
        assert!(settings.warnings[0].contains("`color`"));
        assert!(settings.warnings[1].contains("[paths]"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("virtkit.toml");
        fs::write(&path, "[paths\n").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(Error::ParseConfig { .. })
        ));
    }

    #[test]
    fn empty_emulator_dir_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("virtkit.toml");
        fs::write(&path, "[paths]\nemulators = \"\"\n").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn environment_overrides_win() {
        temp_env::with_vars(
            [
                (DATA_DIR_ENV, Some("/srv/guests")),
                (EMULATOR_DIR_ENV, Some("/opt/qemu/bin")),
                (SOCKET_DIR_ENV, Some("")),
            ],
            || {
                let mut settings = Settings::default();
                settings.apply_env_overrides();
                assert_eq!(settings.data_dir, PathBuf::from("/srv/guests"));
                assert_eq!(settings.emulator_dir, Some(PathBuf::from("/opt/qemu/bin")));
                assert_eq!(settings.socket_dir, PathBuf::from("sock"));
            },
        );
    }
}
