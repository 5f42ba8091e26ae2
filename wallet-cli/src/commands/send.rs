//! Send command - transfer to a saved contact

use anyhow::Result;
use dialoguer::Select;
use uuid::Uuid;
use wallet_core::{Contact, Error, Session, WalletContext};

use super::ledger::print_receipt;
use super::{get_session, read_amount};

pub fn run(
    contact: Option<Uuid>,
    search: Option<String>,
    amount: Option<String>,
    json: bool,
) -> Result<()> {
    let (ctx, session) = get_session()?;

    let contact_id = match contact {
        Some(id) => Some(id),
        None => pick_contact(&ctx, &session, search.as_deref().unwrap_or(""))?,
    };

    let Some(contact_id) = contact_id else {
        return Err(Error::validation("Select a contact").into());
    };

    let amount = read_amount(amount)?;
    let receipt = ctx.ledger_service.send(&session, Some(contact_id), amount)?;
    print_receipt(&ctx, &receipt, "Transfer sent", json)
}

/// Let the user choose among the contacts matching `term`.
/// Returns the chosen id, or None when the prompt is dismissed.
fn pick_contact(ctx: &WalletContext, session: &Session, term: &str) -> Result<Option<Uuid>> {
    let candidates: Vec<Contact> = ctx.contact_service.filter_contacts(session, term)?;
    if candidates.is_empty() {
        let message = if term.trim().is_empty() {
            "No saved contacts. Add one with `aw contacts add`".to_string()
        } else {
            format!("No contact matches '{}'", term.trim())
        };
        return Err(Error::validation(message).into());
    }

    let labels: Vec<String> = candidates.iter().map(Contact::label).collect();
    let choice = Select::new()
        .with_prompt("Send to")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| candidates[i].id))
}
