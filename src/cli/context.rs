use std::io::{self, BufRead, Write};

use crate::error::ContactError;
use crate::model::Contact;
use crate::store::ContactStore;

pub struct CLIContext {
    pub store: ContactStore,
    input: Box<dyn BufRead>,
}

impl CLIContext {
    /// A context reading answers from stdin.
    pub fn new(store: ContactStore) -> Self {
        Self::with_input(store, Box::new(io::stdin().lock()))
    }

    /// A context reading answers from `input`, one per line.
    pub fn with_input(store: ContactStore, input: Box<dyn BufRead>) -> Self {
        Self { store, input }
    }

    /// Prompt and read a line of input. Returns None on EOF.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&mut self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Re-prompt until a non-empty value is entered. Returns None on EOF.
    pub fn prompt_non_empty(&mut self, prompt: &str) -> Option<String> {
        loop {
            let value = self.prompt(prompt)?;
            if !value.is_empty() {
                return Some(value);
            }
            println!("Input cannot be empty.");
        }
    }

    /// True only for an explicit "y" (any case).
    pub fn confirm(&mut self, prompt: &str) -> bool {
        self.prompt(prompt)
            .map(|s| s.eq_ignore_ascii_case("y"))
            .unwrap_or(false)
    }

    pub fn show_contact(contact: &Contact) {
        println!();
        println!("----------------------------");
        println!("ID:      {}", contact.id);
        println!("Name:    {}", contact.name);
        println!("Phone:   {}", or_dash(&contact.phone));
        println!("Email:   {}", or_dash(&contact.email));
        println!("Address: {}", or_dash(&contact.address));
        println!("Notes:   {}", or_dash(&contact.notes));
        println!("----------------------------");
    }

    /// Print an error.
    pub fn print_error(&self, e: &ContactError) {
        println!("Error: {}", e);
    }
}

pub fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
