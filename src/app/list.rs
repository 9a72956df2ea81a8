use crate::Result;
use crate::Settings;
use crate::core::operations;

use super::common::guest_store;

pub fn handle_list(settings: &Settings) -> Result<()> {
    let store = guest_store(settings);
    let names = operations::list_guests(&store)?;
    if names.is_empty() {
        eprintln!("No guest definitions found in {}.", store.data_dir().display());
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
