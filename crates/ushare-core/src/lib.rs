pub mod config;
pub mod error;
pub mod logging;

pub mod account;
pub mod dashboard;
pub mod icon;
pub mod identity;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod templates;
pub mod url_model;

pub use error::{CoreError, CoreResult, ValidationError};
