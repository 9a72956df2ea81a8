use crate::Result;
use crate::Settings;
use crate::cli::ArgsArgs;
use crate::core::operations;

use super::common::guest_store;

pub fn handle_args(args: ArgsArgs, settings: &Settings) -> Result<()> {
    let argv = operations::render_guest(&guest_store(settings), &args.name)?;
    if args.json {
        // Serializing a list of strings cannot fail.
        let rendered = serde_json::to_string(&argv).unwrap_or_default();
        println!("{rendered}");
    } else {
        println!("{}", argv.join(" "));
    }
    Ok(())
}
