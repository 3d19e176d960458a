//! `ushare show | search | follow | friends | share`: public profiles and follows.

use std::sync::Arc;

use anyhow::{bail, Result};
use ushare_core::dashboard::public_profile;
use ushare_core::search::SearchBox;

use super::app::App;
use super::links::print_links;

pub async fn run_show(app: &App, handle: &str) -> Result<()> {
    let links = public_profile(app.store.as_ref(), handle).await?;
    if links.is_empty() {
        println!("{} has no links yet.", handle.trim());
    } else {
        print_links(&links);
    }
    Ok(())
}

pub async fn run_search(app: &App, query: &str, open: bool) -> Result<()> {
    let min = app.cfg.search.min_query_len;
    if query.trim().chars().count() < min {
        bail!("search needs at least {min} characters");
    }
    let search = SearchBox::new(Arc::clone(&app.store), &app.cfg.search);
    let hits = search.on_query(query).await?.unwrap_or_default();

    if open {
        return match search.first_result() {
            Some(first) => run_show(app, &first.handle).await,
            None => bail!("no profile matches '{}'", query.trim()),
        };
    }
    if hits.is_empty() {
        println!("No profiles match '{}'.", query.trim());
    }
    for hit in hits {
        println!("{}", hit.handle);
    }
    Ok(())
}

pub async fn run_follow(app: &App, handle: &str) -> Result<()> {
    let handle = handle.trim();
    if app.dashboard()?.follow(handle).await? {
        println!("Now following {handle}");
    } else {
        println!("Already following {handle}");
    }
    Ok(())
}

pub async fn run_friends(app: &App) -> Result<()> {
    let friends = app.dashboard()?.friends().await?;
    if friends.is_empty() {
        println!("You are not following anyone yet.");
    }
    for friend in friends {
        println!("{}", friend.handle);
    }
    Ok(())
}

pub fn run_share(app: &App) -> Result<()> {
    println!("{}", app.dashboard()?.share_url(&app.cfg.public_base_url));
    Ok(())
}
