use std::env;
use std::path::{Path, PathBuf};

use crate::cli::InitArgs;
use crate::core::{
    BlockDevicesOptions, DriveOptions, Guest, MemoryOptions, QmpOptions, SmpOptions, operations,
};
use crate::{Error, Result, Settings};

use super::common::guest_store;

pub fn handle_init(args: InitArgs, settings: &Settings) -> Result<()> {
    let mut guest = guest_from_args(&args, settings)?;
    let path = operations::create_guest(&guest_store(settings), &mut guest)?;

    println!("✔ Created guest `{}`.", guest.name);
    println!("  definition → {}", path.display());
    println!("  uuid       → {}", guest.uuid);
    println!();
    println!("Next steps:");
    println!("  • Edit the definition to add devices or network backends.");
    println!("  • Run `virtkit start {}` to launch it.", guest.name);

    Ok(())
}

fn guest_from_args(args: &InitArgs, settings: &Settings) -> Result<Guest> {
    let mut guest = Guest::new(args.name.clone(), args.engine);
    guest.daemonize = args.daemonize;
    guest.no_graphic = args.no_graphic;

    if let Some(size) = args.memory {
        guest.memory = Some(MemoryOptions::new(size));
    }
    if let Some(cpus) = args.cpus {
        guest.smp = Some(SmpOptions {
            cpus,
            ..SmpOptions::default()
        });
    }
    if let Some(disk) = &args.disk {
        let file = absolute(&settings.disk_dir.join(disk))?;
        let format = match file.extension().and_then(|ext| ext.to_str()) {
            Some("qcow2") => "qcow2",
            _ => "",
        };
        guest.block_devices = Some(BlockDevicesOptions {
            drive: vec![DriveOptions {
                file: file.display().to_string(),
                interface: "virtio".to_string(),
                format: format.to_string(),
                ..DriveOptions::default()
            }],
            ..BlockDevicesOptions::default()
        });
    }
    if args.qmp {
        let socket = absolute(&settings.socket_dir.join(format!("{}.qmp", args.name)))?;
        guest.qmp = Some(QmpOptions::unix(socket, true, false));
    }

    Ok(guest)
}

/// Definitions outlive the directory they were created from.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|source| Error::WorkingDirectoryUnavailable { source })?;
    Ok(cwd.join(path))
}
