//! Tests for templates, add, edit, list, remove.

use super::parse;
use crate::cli::commands::is_yes;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_templates_and_list() {
    assert!(matches!(parse(&["ushare", "templates"]), CliCommand::Templates));
    assert!(matches!(parse(&["ushare", "list"]), CliCommand::List));
}

#[test]
fn cli_parse_add_with_handle() {
    match parse(&["ushare", "add", "--platform", "instagram", "--handle", "alice"]) {
        CliCommand::Add {
            platform,
            handle,
            link,
        } => {
            assert_eq!(platform, "instagram");
            assert_eq!(handle.as_deref(), Some("alice"));
            assert!(link.is_none());
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_parse_add_requires_platform() {
    assert!(Cli::try_parse_from(["ushare", "add", "--handle", "alice"]).is_err());
}

#[test]
fn cli_parse_edit() {
    match parse(&["ushare", "edit", "7", "--link", "x.com/alice"]) {
        CliCommand::Edit {
            id,
            platform,
            handle,
            link,
        } => {
            assert_eq!(id, 7);
            assert!(platform.is_none());
            assert!(handle.is_none());
            assert_eq!(link.as_deref(), Some("x.com/alice"));
        }
        _ => panic!("expected Edit"),
    }
}

#[test]
fn cli_parse_remove() {
    match parse(&["ushare", "remove", "99"]) {
        CliCommand::Remove { id, yes } => {
            assert_eq!(id, 99);
            assert!(!yes);
        }
        _ => panic!("expected Remove"),
    }
    match parse(&["ushare", "remove", "3", "-y"]) {
        CliCommand::Remove { id, yes } => {
            assert_eq!(id, 3);
            assert!(yes);
        }
        _ => panic!("expected Remove with --yes"),
    }
}

#[test]
fn confirmation_answers() {
    assert!(is_yes("y"));
    assert!(is_yes(" YES\n"));
    assert!(!is_yes(""));
    assert!(!is_yes("no"));
}
