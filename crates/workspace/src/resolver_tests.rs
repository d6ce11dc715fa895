use std::path::PathBuf;

use super::*;

fn ctx() -> WorkspaceContext {
    WorkspaceContext::new("/scope")
        .with_session_workspace("/scope/.prizm/agent-sessions/s1/workspace")
        .with_run_workspace("/scope/.prizm/workflows/wf/run-workspaces/r1")
}

#[test]
fn relative_path_with_no_workspace_arg_defaults_to_run_when_present() {
    let resolved = resolve(&ctx(), "notes.md", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Run);
    assert_eq!(resolved.relative_path, "notes.md");
}

#[test]
fn relative_path_with_no_run_workspace_defaults_to_main() {
    let ctx = WorkspaceContext::new("/scope");
    let resolved = resolve(&ctx, "notes.md", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Main);
}

#[test]
fn explicit_workspace_arg_overrides_the_default() {
    let resolved = resolve(&ctx(), "notes.md", Some(WorkspaceArg::Session)).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Session);
    assert_eq!(resolved.file_root, PathBuf::from("/scope/.prizm/agent-sessions/s1/workspace"));
}

#[test]
fn explicit_workspace_arg_for_an_absent_root_is_out_of_bounds() {
    let ctx = WorkspaceContext::new("/scope");
    assert!(resolve(&ctx, "notes.md", Some(WorkspaceArg::Run)).is_none());
}

#[test]
fn relative_parent_dir_traversal_is_rejected() {
    assert!(resolve(&ctx(), "../../etc/passwd", None).is_none());
    assert!(resolve(&ctx(), "a/../../b", None).is_none());
}

#[test]
fn absolute_path_under_run_workspace_resolves_to_run_even_though_main_also_contains_it() {
    let resolved = resolve(&ctx(), "/scope/.prizm/workflows/wf/run-workspaces/r1/out.md", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Run);
    assert_eq!(resolved.relative_path, "out.md");
}

#[test]
fn absolute_path_under_session_workspace_resolves_to_session() {
    let resolved = resolve(&ctx(), "/scope/.prizm/agent-sessions/s1/workspace/draft.md", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Session);
}

#[test]
fn absolute_path_under_scope_root_only_resolves_to_main() {
    let resolved = resolve(&ctx(), "/scope/report.md", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Main);
    assert_eq!(resolved.relative_path, "report.md");
}

#[test]
fn absolute_path_outside_every_root_is_out_of_bounds_without_a_grant() {
    assert!(resolve(&ctx(), "/etc/passwd", None).is_none());
}

#[test]
fn absolute_path_under_a_granted_root_resolves_as_granted() {
    let mut ctx = WorkspaceContext::new("/scope");
    ctx.granted_paths.push(GrantedPath {
        label: "Downloads".to_string(),
        root: PathBuf::from("/home/user/Downloads"),
    });
    let resolved = resolve(&ctx, "/home/user/Downloads/report.pdf", None).unwrap();
    assert_eq!(resolved.ws_type, WorkspaceKind::Granted);
    assert_eq!(resolved.relative_path, "report.pdf");
}

#[test]
fn absolute_path_with_dot_dot_that_still_escapes_its_root_is_rejected() {
    let resolved = resolve(&ctx(), "/scope/sub/../../outside/report.md", None);
    assert!(resolved.is_none());
}

#[test]
fn workspace_arg_parses_known_names_and_rejects_unknown() {
    assert_eq!(WorkspaceArg::parse("main"), Some(WorkspaceArg::Main));
    assert_eq!(WorkspaceArg::parse("run"), Some(WorkspaceArg::Run));
    assert_eq!(WorkspaceArg::parse("bogus"), None);
}
