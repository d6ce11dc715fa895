use super::*;

#[test]
fn parses_plain_form_with_no_args() {
    assert_eq!(
        parse_slash_message("/help"),
        Some(ParsedSlashCommand {
            name: "help".to_string(),
            args: vec![],
        })
    );
}

#[test]
fn parses_parenthesized_form_with_args() {
    assert_eq!(
        parse_slash_message("/(skill off my-skill)"),
        Some(ParsedSlashCommand {
            name: "skill".to_string(),
            args: vec!["off".to_string(), "my-skill".to_string()],
        })
    );
}

#[test]
fn bare_slash_is_not_a_command() {
    assert_eq!(parse_slash_message("/"), None);
}

#[test]
fn leading_whitespace_and_case_are_normalized() {
    assert_eq!(
        parse_slash_message("  /HELP"),
        Some(ParsedSlashCommand {
            name: "help".to_string(),
            args: vec![],
        })
    );
}

#[test]
fn non_slash_text_is_not_a_command() {
    assert_eq!(parse_slash_message("hello there"), None);
}

fn echo_handler() -> SlashCommandHandler {
    Arc::new(|args: &[String]| args.join(","))
}

#[test]
fn dispatch_resolves_by_alias_case_insensitively() {
    let registry = SlashCommandRegistry::new();
    registry.register(SlashCommand {
        name: "help".to_string(),
        aliases: vec!["h".to_string(), "?".to_string()],
        builtin: true,
        handler: echo_handler(),
    });

    assert_eq!(registry.dispatch("/HELP a b").as_deref(), Some("a,b"));
    assert_eq!(registry.dispatch("/h a b").as_deref(), Some("a,b"));
    assert_eq!(registry.dispatch("/?").as_deref(), Some(""));
}

#[test]
fn dispatch_is_none_for_an_unregistered_command() {
    let registry = SlashCommandRegistry::new();
    assert_eq!(registry.dispatch("/ghost"), None);
}

#[test]
fn clear_user_commands_preserves_builtins() {
    let registry = SlashCommandRegistry::new();
    registry.register(SlashCommand {
        name: "help".to_string(),
        aliases: vec![],
        builtin: true,
        handler: echo_handler(),
    });
    registry.register(SlashCommand {
        name: "my-skill".to_string(),
        aliases: vec![],
        builtin: false,
        handler: echo_handler(),
    });

    registry.clear_user_commands();

    assert!(registry.resolve("help").is_some());
    assert!(registry.resolve("my-skill").is_none());
}
