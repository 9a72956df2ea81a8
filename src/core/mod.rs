//! Guest model, argument rendering, persistence and process control.

pub mod args;
pub mod devices;
pub mod drives;
pub mod engine;
pub mod guest;
pub mod memory;
pub mod network;
pub mod qmp;
pub mod smp;

pub mod launcher;
pub mod listener;
pub mod operations;
pub mod store;

pub use args::ToArgs;
pub use devices::DeviceOptions;
pub use drives::{BlockDevOptions, BlockDevicesOptions, CdromOptions, DriveOptions};
pub use engine::EngineArch;
pub use guest::Guest;
pub use launcher::{LaunchOutcome, Launcher, ProcessLauncher};
pub use listener::ListenerRegistry;
pub use memory::MemoryOptions;
pub use network::{
    NetdevAfXdpOptions, NetdevBridgeOptions, NetdevHubportOptions, NetdevL2tpv3Options,
    NetdevPasstOptions, NetdevSocketOptions, NetdevTapOptions, NetdevUserOptions,
    NetdevVdeOptions, NetdevVhostUserOptions, NetdevVhostVdpaOptions, NicOptions, NicType,
};
pub use operations::{create_guest, list_guests, render_guest, start_guest};
pub use qmp::QmpOptions;
pub use smp::SmpOptions;
pub use store::{GuestStore, load_guest_from_path};
