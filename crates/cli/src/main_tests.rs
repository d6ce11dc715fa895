use clap::error::ErrorKind;

use super::cli_command;

#[test]
fn version_flag_is_recognized() {
    let err = cli_command().try_get_matches_from(["prizm", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn help_lists_every_subcommand() {
    let mut buf = Vec::new();
    cli_command().write_long_help(&mut buf).unwrap();
    let help = String::from_utf8(buf).unwrap();
    for name in ["scope", "doc", "todo", "schedule", "workflow", "tool"] {
        assert!(help.contains(name), "help should mention `{name}`: {help}");
    }
}

#[test]
fn doc_show_requires_an_id() {
    let err = cli_command().try_get_matches_from(["prizm", "doc", "show"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_subcommand_is_rejected() {
    let err = cli_command().try_get_matches_from(["prizm", "bogus"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
}
