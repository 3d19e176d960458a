//! `ushare signup | signin | signout | whoami`.

use anyhow::{bail, Result};
use ushare_core::identity::SignUpOutcome;
use ushare_core::model::public_profile_url;

use super::app::App;
use super::prompt;

pub async fn run_signup(app: &App, email: &str, handle: &str, password: Option<String>) -> Result<()> {
    let password = prompt::password(password)?;
    match app.accounts().sign_up(email, &password, handle).await? {
        SignUpOutcome::SignedIn(session) => {
            app.sessions.save(&session)?;
            println!(
                "Signed up as {}. Your profile: {}",
                session.user.handle,
                public_profile_url(&app.cfg.public_base_url, &session.user.handle)
            );
        }
        SignUpOutcome::ConfirmationRequired(account) => {
            println!(
                "Account created. Confirm the email sent to {}, then run `ushare signin`.",
                account.email
            );
        }
    }
    Ok(())
}

pub async fn run_signin(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let password = prompt::password(password)?;
    let session = app.accounts().sign_in(email, &password).await?;
    app.sessions.save(&session)?;
    println!("Signed in as {}", session.user.handle);
    Ok(())
}

pub async fn run_signout(app: &App) -> Result<()> {
    let Some(session) = app.sessions.load()? else {
        println!("Not signed in.");
        return Ok(());
    };
    // The local session goes away even if the service could not be reached.
    if let Err(err) = app.accounts().sign_out(&session).await {
        tracing::warn!("remote sign-out failed: {err:#}");
    }
    app.sessions.clear()?;
    println!("Signed out.");
    Ok(())
}

pub async fn run_whoami(app: &App) -> Result<()> {
    let session = app.session()?;
    match app.accounts().current_user(&session).await? {
        Some(account) => {
            println!("{} <{}>", account.handle, account.email);
            Ok(())
        }
        None => {
            app.sessions.clear()?;
            bail!("session expired; run `ushare signin` again")
        }
    }
}
