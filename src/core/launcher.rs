use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, info};

use crate::error::{Error, Result};

use super::guest::Guest;

/// Captured result of an emulator run that exited successfully.
#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub stdout: String,
    pub stderr: String,
}

/// Starts emulator processes for guests.
pub trait Launcher {
    fn launch(&self, guest: &mut Guest) -> Result<LaunchOutcome>;
}

/// Spawns the emulator as a child process and blocks until it exits.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    emulator_dir: Option<PathBuf>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve emulator binaries inside `dir` instead of through `PATH`.
    pub fn with_emulator_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            emulator_dir: Some(dir.into()),
        }
    }

    pub fn program_for(&self, binary: &str) -> PathBuf {
        match &self.emulator_dir {
            Some(dir) => dir.join(binary),
            None => PathBuf::from(binary),
        }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, guest: &mut Guest) -> Result<LaunchOutcome> {
        let mut args = guest.to_args();
        let binary = args.remove(0);
        let program = self.program_for(&binary);

        debug!("{} {}", program.display(), args.join(" "));
        info!("launching guest `{}` with {}", guest.name, program.display());

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        outcome_from_output(&guest.name, &program, args, output)
    }
}

fn outcome_from_output(
    guest: &str,
    program: &Path,
    args: Vec<String>,
    output: Output,
) -> Result<LaunchOutcome> {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(Error::LaunchFailed {
            guest: guest.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    info!("guest `{guest}` exited cleanly");
    Ok(LaunchOutcome {
        program: program.to_path_buf(),
        args,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr,
    })
}
