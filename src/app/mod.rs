pub mod args;
pub mod common;
pub mod error;
pub mod init;
pub mod list;
pub mod start;

pub use args::handle_args;
pub use init::handle_init;
pub use list::handle_list;
pub use start::handle_start;
