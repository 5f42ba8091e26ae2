//! Register, login and logout

use anyhow::Result;
use colored::Colorize;
use dialoguer::Password;
use serde_json::json;

use super::{get_context, read_text};
use crate::output;

pub fn run_register(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let name = read_text(name, "Name")?;
    let email = read_text(email, "Email")?;

    // A password typed at the prompt is confirmed; one passed as a flag is not
    let (password, confirmation) = match password {
        Some(p) => (p, None),
        None => {
            let p = Password::new().with_prompt("Password").interact()?;
            let c = Password::new().with_prompt("Confirm password").interact()?;
            (p, Some(c))
        }
    };

    let user = ctx
        .account_service
        .register(&name, &email, &password, confirmation.as_deref())?;

    if json {
        return output::json(&json!({
            "name": user.name,
            "email": user.email,
            "balance": ctx.config.initial_balance,
        }));
    }

    output::success(&format!("Account created for {}", user.name));
    println!(
        "  Opening balance: {}",
        super::money(&ctx, ctx.config.initial_balance).bold()
    );
    println!("{}", "Log in with `aw login` to start using it.".dimmed());
    Ok(())
}

pub fn run_login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let email = read_text(email, "Email")?;
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let user = ctx.account_service.authenticate(&email, &password)?;
    let session = ctx.session_service.login(&user.email)?;

    if json {
        return output::json(&json!({ "email": session.email(), "name": user.name }));
    }

    output::success(&format!("Welcome, {}", user.name));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    let was_logged_in = ctx.session_service.current_user()?.is_some();
    ctx.session_service.logout()?;

    if was_logged_in {
        output::success("Logged out");
    } else {
        output::info("No active session");
    }
    Ok(())
}
