use log::debug;

use crate::Result;
use crate::Settings;
use crate::cli::StartArgs;
use crate::core::{ListenerRegistry, ProcessLauncher, operations};

use super::common::guest_store;

pub fn handle_start(args: StartArgs, settings: &Settings) -> Result<()> {
    let registry = if args.no_chown {
        ListenerRegistry::without_chown()
    } else {
        ListenerRegistry::new(settings.socket_owner)
    };
    let launcher = match &settings.emulator_dir {
        Some(dir) => ProcessLauncher::with_emulator_dir(dir),
        None => ProcessLauncher::new(),
    };

    let outcome = operations::start_guest(&guest_store(settings), &launcher, &registry, &args.name)?;
    if !outcome.stderr.is_empty() {
        debug!("emulator stderr:\n{}", outcome.stderr);
    }

    println!("Guest `{}` exited.", args.name);
    Ok(())
}
