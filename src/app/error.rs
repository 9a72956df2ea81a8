use std::io::ErrorKind;
use std::process::ExitCode;

use crate::Error;

pub fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::AlreadyExists { .. } => ExitCode::from(73),
        Error::ListenerExists { .. } => ExitCode::from(73),
        Error::ReadGuest { source, .. } if source.kind() == ErrorKind::NotFound => {
            ExitCode::from(66)
        }
        Error::ReadGuest { .. } => ExitCode::from(74),
        Error::WriteGuest { .. } => ExitCode::from(74),
        Error::ListDir { .. } => ExitCode::from(74),
        Error::Listener { .. } => ExitCode::from(74),
        Error::ReadConfig { .. } => ExitCode::from(74),
        Error::InvalidGuestName { .. } => ExitCode::from(65),
        Error::DecodeGuest { .. } => ExitCode::from(65),
        Error::ParseConfig { .. } => ExitCode::from(65),
        Error::InvalidConfig { .. } => ExitCode::from(65),
        Error::EncodeGuest { .. } => ExitCode::from(70),
        Error::LaunchFailed { .. } => ExitCode::from(70),
        Error::WorkingDirectoryUnavailable { .. } => ExitCode::from(70),
        Error::Spawn { .. } => ExitCode::from(69),
    }
}
