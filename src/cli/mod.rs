pub mod context;
pub mod contact_commands;
pub mod transfer_commands;

use std::path::Path;

use tracing::warn;

use crate::store::ContactStore;
use context::CLIContext;

const MENU: &[(&str, &str)] = &[
    ("1", "Add contact"),
    ("2", "List contacts"),
    ("3", "View / Search contact"),
    ("4", "Update contact"),
    ("5", "Delete contact"),
    ("6", "Import contacts from JSON"),
    ("7", "Export contacts to JSON"),
    ("0", "Exit"),
];

/// Run the interactive menu against the contacts file at `data_path`.
pub fn run(data_path: &Path) {
    let store = ContactStore::open(data_path);
    let mut ctx = CLIContext::new(store);
    menu_loop(&mut ctx);
}

/// Show the menu and dispatch choices until "0" or end of input.
pub fn menu_loop(ctx: &mut CLIContext) {
    loop {
        print_menu();

        let choice = match ctx.prompt("Choose an option: ") {
            Some(s) => s,
            None => {
                println!();
                println!("Goodbye!");
                break;
            }
        };

        let result = match choice.as_str() {
            "0" => {
                println!("Goodbye!");
                break;
            }
            "1" => contact_commands::add(ctx),
            "2" => contact_commands::list(ctx),
            "3" => contact_commands::view(ctx),
            "4" => contact_commands::update(ctx),
            "5" => contact_commands::delete(ctx),
            "6" => transfer_commands::import(ctx),
            "7" => transfer_commands::export(ctx),
            _ => {
                println!("Invalid option.");
                continue;
            }
        };

        // Action errors never end the session.
        if let Err(e) = result {
            warn!(choice = %choice, error = %e, "menu action failed");
            ctx.print_error(&e);
        }
    }
}

fn print_menu() {
    println!();
    println!("=== Contact Book ===");
    for (key, description) in MENU {
        println!("{}. {}", key, description);
    }
}
