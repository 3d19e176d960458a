//! `ushare templates | add | edit | list | remove`: the owner's links.
//!
//! `add` and `edit` drive an `EditSession` with the given flags in the order a
//! form would see them: template first, then handle, then link.

use anyhow::{bail, Context, Result};
use ushare_core::dashboard::Dashboard;
use ushare_core::model::{LinkId, LinkView};
use ushare_core::session::EditSession;
use ushare_core::store::SqliteStore;
use ushare_core::templates::templates;
use ushare_core::CoreError;

use super::app::App;
use super::prompt;

pub fn run_templates() {
    println!("{:<10} {:<12} {}", "ID", "NAME", "HANDLE");
    for t in templates() {
        let handle = if t.is_custom { "-" } else { t.placeholder };
        println!("{:<10} {:<12} {}", t.id, t.display_name, handle);
    }
}

pub async fn run_add(app: &App, platform: &str, handle: Option<&str>, link: Option<&str>) -> Result<()> {
    let dash = app.dashboard()?;
    let mut entry = EditSession::new();
    entry.select_template(platform)?;
    apply_inputs(&mut entry, handle, link);
    save(&dash, entry).await
}

pub async fn run_edit(
    app: &App,
    id: LinkId,
    platform: Option<&str>,
    handle: Option<&str>,
    link: Option<&str>,
) -> Result<()> {
    let dash = app.dashboard()?;
    dash.refresh().await?;
    let view = dash
        .link(id)
        .ok_or_else(|| CoreError::not_found("link", id.to_string()))?;

    let mut entry = EditSession::from_link(&view.link);
    if let Some(platform) = platform {
        // Picking the current template again would clear the form.
        let current = entry.selected_template().map(|t| t.id);
        if current != Some(platform) {
            entry.select_template(platform)?;
        }
    }
    apply_inputs(&mut entry, handle, link);
    save(&dash, entry).await
}

fn apply_inputs(entry: &mut EditSession, handle: Option<&str>, link: Option<&str>) {
    if let Some(handle) = handle {
        entry.edit_handle(handle);
    }
    if let Some(link) = link {
        entry.edit_link(link);
    }
}

async fn save(dash: &Dashboard<SqliteStore>, mut entry: EditSession) -> Result<()> {
    if let Some(reason) = entry.blocked_reason() {
        bail!("cannot save link: {reason}");
    }
    let submission = entry.submit().context("link entry already closed")?;
    match dash.commit(submission).await? {
        Some(view) => print_link(&view),
        None => println!("Another save is still in progress; skipped."),
    }
    Ok(())
}

pub async fn run_list(app: &App) -> Result<()> {
    let links = app.dashboard()?.refresh().await?;
    if links.is_empty() {
        println!("No links yet. Add one with `ushare add --platform <id>`.");
    } else {
        print_links(&links);
    }
    Ok(())
}

pub async fn run_remove(app: &App, id: LinkId, yes: bool) -> Result<()> {
    let dash = app.dashboard()?;
    dash.refresh().await?;
    let view = dash
        .link(id)
        .ok_or_else(|| CoreError::not_found("link", id.to_string()))?;
    let question = format!("Delete {} link {}?", view.link.platform, view.link.url);
    if !yes && !prompt::confirm(&question)? {
        println!("Kept link {id}");
        return Ok(());
    }
    dash.delete(id).await?;
    println!("Removed link {id}");
    Ok(())
}

pub(super) fn print_links(links: &[LinkView]) {
    println!("{:<6} {:<12} {:<20} {}", "ID", "PLATFORM", "USERNAME", "URL");
    for view in links {
        print_link(view);
    }
}

fn print_link(view: &LinkView) {
    println!(
        "{:<6} {:<12} {:<20} {}",
        view.link.id, view.link.platform, view.link.username, view.link.url
    );
}
