//! CLI for ushare link-in-bio profiles.

mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ushare_core::config;
use ushare_core::identity::{RemoteIdentity, SessionFile};
use ushare_core::store::SqliteStore;

use commands::{
    run_add, run_edit, run_follow, run_friends, run_list, run_remove, run_search, run_share,
    run_show, run_signin, run_signout, run_signup, run_templates, run_whoami, App,
};

/// Top-level CLI for ushare.
#[derive(Debug, Parser)]
#[command(name = "ushare")]
#[command(about = "ushare: one public page for all your links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Create an account and its public profile.
    Signup {
        #[arg(long)]
        email: String,
        /// Public handle; the profile is served at /u/<handle>.
        #[arg(long)]
        handle: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and remember the session.
    Signin {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session.
    Signout,

    /// Show the signed-in account.
    Whoami,

    /// List the platform templates usable with `add --platform`.
    Templates,

    /// Add a link to your profile.
    Add {
        /// Template id (see `ushare templates`).
        #[arg(long)]
        platform: String,
        /// Username on the platform; the link is built from it.
        #[arg(long)]
        handle: Option<String>,
        /// Full link; overrides the built one.
        #[arg(long)]
        link: Option<String>,
    },

    /// Edit one of your links.
    Edit {
        /// Link identifier (see `ushare list`).
        id: i64,
        /// Switch to another template; resets handle and link.
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        handle: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },

    /// List your links.
    List,

    /// Delete one of your links.
    Remove {
        /// Link identifier.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show the public profile of a handle.
    Show {
        handle: String,
    },

    /// Search public profiles by handle.
    Search {
        query: String,
        /// Open the first match, as pressing Enter in the search box would.
        #[arg(long)]
        open: bool,
    },

    /// Follow a profile by handle.
    Follow {
        handle: String,
    },

    /// List the profiles you follow.
    Friends,

    /// Print your shareable profile URL.
    Share,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        if !cfg.identity.is_configured() {
            tracing::warn!("identity service not configured; using placeholder endpoint");
        }

        let store = match &cfg.database_path {
            Some(path) => SqliteStore::open_at(path).await?,
            None => SqliteStore::open_default().await?,
        };
        let sessions = SessionFile::open_default()?;
        tracing::debug!(session = %sessions.path().display(), "session file");
        let app = App {
            store: Arc::new(store),
            identity: Arc::new(RemoteIdentity::from_config(&cfg.identity)),
            sessions,
            cfg,
        };

        match cli.command {
            CliCommand::Signup {
                email,
                handle,
                password,
            } => run_signup(&app, &email, &handle, password).await?,
            CliCommand::Signin { email, password } => run_signin(&app, &email, password).await?,
            CliCommand::Signout => run_signout(&app).await?,
            CliCommand::Whoami => run_whoami(&app).await?,
            CliCommand::Templates => run_templates(),
            CliCommand::Add {
                platform,
                handle,
                link,
            } => run_add(&app, &platform, handle.as_deref(), link.as_deref()).await?,
            CliCommand::Edit {
                id,
                platform,
                handle,
                link,
            } => {
                run_edit(
                    &app,
                    id,
                    platform.as_deref(),
                    handle.as_deref(),
                    link.as_deref(),
                )
                .await?
            }
            CliCommand::List => run_list(&app).await?,
            CliCommand::Remove { id, yes } => run_remove(&app, id, yes).await?,
            CliCommand::Show { handle } => run_show(&app, &handle).await?,
            CliCommand::Search { query, open } => run_search(&app, &query, open).await?,
            CliCommand::Follow { handle } => run_follow(&app, &handle).await?,
            CliCommand::Friends => run_friends(&app).await?,
            CliCommand::Share => run_share(&app)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
