use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use env_logger::Env;

use virtkit::app::{common, error::exit_code, handle_args, handle_init, handle_list, handle_start};
use virtkit::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(64),
            };
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let Cli {
        config,
        data_dir,
        command,
    } = cli;

    let command = match command {
        Some(cmd) => cmd,
        None => {
            let mut command = Cli::command();
            let _ = command.print_help();
            println!();
            return ExitCode::from(64);
        }
    };

    let exit = common::load_settings(config.as_ref(), data_dir.as_ref()).and_then(|settings| {
        match command {
            Commands::Init(args) => handle_init(args, &settings),
            Commands::Args(args) => handle_args(args, &settings),
            Commands::Start(args) => handle_start(args, &settings),
            Commands::List => handle_list(&settings),
        }
    });

    match exit {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            exit_code(&err)
        }
    }
}
