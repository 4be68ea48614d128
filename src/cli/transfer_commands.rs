use std::path::Path;

use crate::cli::context::CLIContext;
use crate::error::ContactResult;
use crate::transfer;

pub fn import(ctx: &mut CLIContext) -> ContactResult<()> {
    let path = match ctx.prompt("Enter path to JSON file to import (list or dict): ") {
        Some(p) => p,
        None => return Ok(()),
    };

    let added = transfer::import_contacts(&mut ctx.store, Path::new(&path))?;
    println!("Imported {} contacts.", added);
    Ok(())
}

pub fn export(ctx: &mut CLIContext) -> ContactResult<()> {
    let path = match ctx.prompt("Enter file path to export contacts to (e.g. export.json): ") {
        Some(p) => p,
        None => return Ok(()),
    };
    if path.is_empty() {
        println!("No path given.");
        return Ok(());
    }

    let exported = transfer::export_contacts(&ctx.store, Path::new(&path))?;
    println!("Exported {} contacts to {}.", exported, path);
    Ok(())
}
