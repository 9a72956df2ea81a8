use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::EngineArch;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level CLI definition for the `virtkit` tool.
#[derive(Debug, Parser)]
#[command(
    name = "virtkit",
    version = VERSION,
    about = "Define QEMU guests in TOML and launch them.",
    long_about = "virtkit keeps one TOML definition per guest, renders it into a QEMU \
                  command line and runs the emulator."
)]
pub struct Cli {
    /// Path to a settings file. Defaults to $VIRTKIT_CONFIG or ./virtkit.toml.
    #[arg(
        global = true,
        short,
        long = "config",
        value_name = "PATH",
        help = "Load settings from PATH instead of ./virtkit.toml"
    )]
    pub config: Option<PathBuf>,

    /// Override the directory holding guest definitions.
    #[arg(
        global = true,
        long = "data-dir",
        value_name = "DIR",
        help = "Read and write guest definitions under DIR"
    )]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a new guest definition. Never overwrites an existing one.
    Init(InitArgs),
    /// Print the emulator command line for a guest.
    Args(ArgsArgs),
    /// Launch a guest and wait for the emulator to exit.
    Start(StartArgs),
    /// List known guest definitions.
    List,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Guest name; also the definition file name.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(
        long,
        value_name = "EMULATOR",
        default_value = "qemu-system-x86_64",
        help = "System emulator, e.g. qemu-system-aarch64"
    )]
    pub engine: EngineArch,

    #[arg(long, value_name = "MIB", help = "Guest RAM in megabytes")]
    pub memory: Option<u32>,

    #[arg(long, value_name = "N", help = "Number of vCPUs")]
    pub cpus: Option<u32>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Attach FILE as a virtio drive (relative names resolve under the disk directory)"
    )]
    pub disk: Option<PathBuf>,

    #[arg(
        long,
        help = "Add a QMP unix socket under the socket directory, served by the emulator"
    )]
    pub qmp: bool,

    #[arg(long, help = "Run the emulator in the background once it has started")]
    pub daemonize: bool,

    #[arg(long, help = "Disable graphical output and use the serial console")]
    pub no_graphic: bool,
}

#[derive(Debug, Args)]
pub struct ArgsArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long, help = "Print the argument vector as a JSON array")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StartArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(
        long,
        help = "Leave control socket ownership unchanged instead of applying [socket_owner]"
    )]
    pub no_chown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rejects_unknown_engine() {
        let err = Cli::try_parse_from(["virtkit", "init", "vm", "--engine", "bochs"]).unwrap_err();
        assert!(err.to_string().contains("bochs"));
    }

    #[test]
    fn parses_init_flags() {
        let cli = Cli::try_parse_from([
            "virtkit",
            "--data-dir",
            "/tmp/guests",
            "init",
            "web",
            "--memory",
            "2048",
            "--cpus",
            "2",
            "--qmp",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/guests")));
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.name, "web");
                assert_eq!(args.engine, EngineArch::X86_64);
                assert_eq!(args.memory, Some(2048));
                assert_eq!(args.cpus, Some(2));
                assert!(args.qmp);
                assert!(!args.daemonize);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
