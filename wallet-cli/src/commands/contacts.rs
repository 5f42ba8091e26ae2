//! Contacts command - saved payees

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use wallet_core::{Contact, NewContact};

use super::{get_session, read_text};
use crate::output;

#[derive(Subcommand)]
pub enum ContactsCommands {
    /// Save a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: Option<String>,
        /// Account number (digits only, at least 10)
        #[arg(long)]
        account_number: Option<String>,
        /// Bank name
        #[arg(long)]
        bank: Option<String>,
        /// Optional alias, also matched by search
        #[arg(long)]
        alias: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every saved contact
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search contacts by name or alias
    Search {
        /// Text to look for
        term: String,
        /// Only the first few matches, as suggested while typing
        #[arg(long)]
        suggest: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: ContactsCommands) -> Result<()> {
    match command {
        ContactsCommands::Add {
            name,
            account_number,
            bank,
            alias,
            json,
        } => run_add(name, account_number, bank, alias, json),
        ContactsCommands::List { json } => {
            let (ctx, session) = get_session()?;
            let contacts = ctx.contact_service.list_contacts(&session)?;
            print_contacts(&contacts, json)
        }
        ContactsCommands::Search {
            term,
            suggest,
            json,
        } => {
            let (ctx, session) = get_session()?;
            let contacts = if suggest {
                ctx.contact_service.search_contacts(&session, &term)?
            } else {
                ctx.contact_service.filter_contacts(&session, &term)?
            };
            print_contacts(&contacts, json)
        }
    }
}

fn run_add(
    name: Option<String>,
    account_number: Option<String>,
    bank: Option<String>,
    alias: Option<String>,
    json: bool,
) -> Result<()> {
    let (ctx, session) = get_session()?;

    // Alias is only prompted when the other fields are being prompted too
    let interactive = name.is_none() || account_number.is_none() || bank.is_none();
    let name = read_text(name, "Name")?;
    let account_number = read_text(account_number, "Account number")?;
    let bank = read_text(bank, "Bank")?;
    let alias = match alias {
        Some(a) => Some(a),
        None if interactive => Some(read_text(None, "Alias (optional)")?),
        None => None,
    };

    let mut new_contact = NewContact::new(name, account_number, bank);
    new_contact.alias = alias;
    let contact = ctx.contact_service.add_contact(&session, new_contact)?;

    if json {
        return output::json(&contact);
    }
    output::success(&format!("Contact saved: {}", contact.label()));
    Ok(())
}

fn print_contacts(contacts: &[Contact], json: bool) -> Result<()> {
    if json {
        return output::json(&contacts);
    }

    if contacts.is_empty() {
        println!("{}", "No contacts found.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Alias", "Bank", "Account", "ID"]);
    for contact in contacts {
        table.add_row(vec![
            contact.name.clone(),
            contact.alias.clone().unwrap_or_default(),
            contact.bank.clone(),
            contact.account_number.clone(),
            contact.id.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
