use crate::cli::context::{or_dash, CLIContext};
use crate::error::{ContactError, ContactResult};
use crate::model::*;
use crate::ops::contact_ops;
use crate::validation;

// Reads a trimmed line or abandons the command on EOF.
macro_rules! prompt_or_cancel {
    ($ctx:expr, $prompt:expr) => {
        match $ctx.prompt($prompt) {
            Some(s) => s,
            None => return Ok(()),
        }
    };
}

pub fn add(ctx: &mut CLIContext) -> ContactResult<()> {
    println!();
    println!("--- Add Contact ---");

    let name = match ctx.prompt_non_empty("Name: ") {
        Some(s) => s,
        None => return Ok(()),
    };

    let mut phone = prompt_or_cancel!(ctx, "Phone (digits, optional +): ");
    if !phone.is_empty() && !validation::validate_phone(&phone) {
        println!("Invalid phone format. It should be 7-15 digits, optional leading +. Save without phone? (y/N)");
        if !ctx.confirm("> ") {
            println!("Cancelled add.");
            return Ok(());
        }
        phone.clear();
    }

    let mut email = prompt_or_cancel!(ctx, "Email: ");
    if !email.is_empty() && !validation::validate_email(&email) {
        println!("Invalid email format. Save without email? (y/N)");
        if !ctx.confirm("> ") {
            println!("Cancelled add.");
            return Ok(());
        }
        email.clear();
    }

    let address = prompt_or_cancel!(ctx, "Address (optional): ");
    let notes = prompt_or_cancel!(ctx, "Notes (optional): ");

    let contact = contact_ops::add_contact(
        &mut ctx.store,
        NewContact {
            name,
            phone,
            email,
            address,
            notes,
        },
    )?;
    println!("Contact '{}' added with id {}.", contact.name, contact.id);
    Ok(())
}

pub fn list(ctx: &mut CLIContext) -> ContactResult<()> {
    let contacts = contact_ops::list_contacts(&ctx.store);
    if contacts.is_empty() {
        println!();
        println!("No contacts found.");
        return Ok(());
    }

    println!();
    println!("--- All Contacts ---");
    for c in contacts {
        println!(
            "[{}] {}  |  {}  |  {}",
            c.id,
            c.name,
            or_dash(&c.phone),
            or_dash(&c.email)
        );
    }
    Ok(())
}

pub fn view(ctx: &mut CLIContext) -> ContactResult<()> {
    let id = prompt_or_cancel!(ctx, "Enter contact id to view (or press Enter to search by name): ");
    if !id.is_empty() {
        match contact_ops::find_contact(&ctx.store, &id) {
            Ok(contact) => CLIContext::show_contact(contact),
            Err(ContactError::NotFound { .. }) => println!("Contact id not found."),
            Err(e) => return Err(e),
        }
        return Ok(());
    }

    let term = prompt_or_cancel!(ctx, "Search name / phone / email: ");
    match contact_ops::search_contacts(&ctx.store, &term) {
        Ok(results) if results.is_empty() => println!("No matching contacts."),
        Ok(results) => {
            println!("Found {} result(s):", results.len());
            for contact in results {
                CLIContext::show_contact(contact);
            }
        }
        Err(ContactError::EmptySearch) => println!("Empty search."),
        Err(e) => return Err(e),
    }
    Ok(())
}

pub fn update(ctx: &mut CLIContext) -> ContactResult<()> {
    let current = match lookup(ctx, "Enter contact id to update: ") {
        Some(c) => c,
        None => return Ok(()),
    };

    println!("Press Enter to keep current value.");
    let name = prompt_or_cancel!(ctx, &format!("Name [{}]: ", current.name));
    let phone = prompt_or_cancel!(ctx, &format!("Phone [{}]: ", or_dash(&current.phone)));
    let email = prompt_or_cancel!(ctx, &format!("Email [{}]: ", or_dash(&current.email)));
    let address = prompt_or_cancel!(ctx, &format!("Address [{}]: ", or_dash(&current.address)));
    let notes = prompt_or_cancel!(ctx, &format!("Notes [{}]: ", or_dash(&current.notes)));

    let outcome = contact_ops::update_contact(
        &mut ctx.store,
        &current.id,
        ContactUpdate {
            name: Some(name),
            phone: Some(phone),
            email: Some(email),
            address: Some(address),
            notes: Some(notes),
        },
    )?;

    for field in &outcome.rejected {
        match field {
            ContactField::Phone => println!("Invalid phone format. Keeping old phone."),
            ContactField::Email => println!("Invalid email. Keeping old email."),
        }
    }
    println!("Contact updated.");
    Ok(())
}

pub fn delete(ctx: &mut CLIContext) -> ContactResult<()> {
    let contact = match lookup(ctx, "Enter contact id to delete: ") {
        Some(c) => c,
        None => return Ok(()),
    };

    CLIContext::show_contact(&contact);
    let prompt = format!("Are you sure you want to delete '{}'? (y/N): ", contact.name);
    if ctx.confirm(&prompt) {
        contact_ops::delete_contact(&mut ctx.store, &contact.id)?;
        println!("Deleted.");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

/// Prompt for an id and fetch that contact. Prints a message if it is missing.
fn lookup(ctx: &mut CLIContext, prompt: &str) -> Option<Contact> {
    let id = ctx.prompt(prompt)?;
    match contact_ops::find_contact(&ctx.store, &id) {
        Ok(contact) => Some(contact.clone()),
        Err(_) => {
            println!("Invalid or missing id.");
            None
        }
    }
}
