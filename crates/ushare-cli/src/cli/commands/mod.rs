//! CLI command handlers, grouped by what they act on.

mod account;
mod app;
mod links;
mod profiles;
mod prompt;

pub use account::{run_signin, run_signout, run_signup, run_whoami};
pub use app::App;
pub use links::{run_add, run_edit, run_list, run_remove, run_templates};
pub use profiles::{run_follow, run_friends, run_search, run_share, run_show};

#[cfg(test)]
pub(super) use prompt::is_yes;
