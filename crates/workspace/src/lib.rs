// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-workspace: the multi-layer addressable filesystem (§4.12).
//!
//! A [`WorkspaceContext`] bundles every root an agent tool call might be
//! allowed to touch — the scope's main workspace plus optional session,
//! run, workflow, and user-granted roots. [`resolve`] maps a raw,
//! tool-supplied path into exactly one of those roots, or rejects it as
//! out of bounds.

use std::path::{Component, Path, PathBuf};

use prizm_core::WorkspaceKind;
use thiserror::Error;

/// Every root a tool call may be allowed to address, bundled per invocation.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceContext {
    pub scope_root: PathBuf,
    pub session_workspace_root: Option<PathBuf>,
    pub run_workspace_root: Option<PathBuf>,
    pub workflow_workspace_root: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Extra directories a user has explicitly granted, labeled for
    /// surfacing back in consent prompts.
    pub granted_paths: Vec<GrantedPath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedPath {
    pub label: String,
    pub root: PathBuf,
}

impl WorkspaceContext {
    pub fn new(scope_root: impl Into<PathBuf>) -> Self {
        Self {
            scope_root: scope_root.into(),
            session_workspace_root: None,
            run_workspace_root: None,
            workflow_workspace_root: None,
            session_id: None,
            granted_paths: Vec::new(),
        }
    }

    pub fn with_session_workspace(mut self, root: impl Into<PathBuf>) -> Self {
        self.session_workspace_root = Some(root.into());
        self
    }

    pub fn with_run_workspace(mut self, root: impl Into<PathBuf>) -> Self {
        self.run_workspace_root = Some(root.into());
        self
    }

    pub fn with_workflow_workspace(mut self, root: impl Into<PathBuf>) -> Self {
        self.workflow_workspace_root = Some(root.into());
        self
    }

    fn root_for(&self, kind: WorkspaceKind) -> Option<&Path> {
        match kind {
            WorkspaceKind::Main => Some(self.scope_root.as_path()),
            WorkspaceKind::Session => self.session_workspace_root.as_deref(),
            WorkspaceKind::Run => self.run_workspace_root.as_deref(),
            WorkspaceKind::Workflow => self.workflow_workspace_root.as_deref(),
            WorkspaceKind::Granted => None,
        }
    }

    /// Root precedence for resolving an **absolute** path: most specific
    /// sandbox wins (§4.12).
    fn absolute_precedence(&self) -> [WorkspaceKind; 4] {
        [
            WorkspaceKind::Run,
            WorkspaceKind::Workflow,
            WorkspaceKind::Session,
            WorkspaceKind::Main,
        ]
    }

    /// Default root for a relative path with no explicit `workspace` arg:
    /// the run workspace when present (an agent inside a workflow step sees
    /// its own sandbox by default), otherwise main.
    fn default_relative_kind(&self) -> WorkspaceKind {
        if self.run_workspace_root.is_some() {
            WorkspaceKind::Run
        } else {
            WorkspaceKind::Main
        }
    }
}

/// The `workspace` argument a tool call may supply to pick a relative root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceArg {
    Main,
    Session,
    Run,
    Workflow,
}

impl WorkspaceArg {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "main" => Some(WorkspaceArg::Main),
            "session" => Some(WorkspaceArg::Session),
            "run" => Some(WorkspaceArg::Run),
            "workflow" => Some(WorkspaceArg::Workflow),
            _ => None,
        }
    }

    fn kind(self) -> WorkspaceKind {
        match self {
            WorkspaceArg::Main => WorkspaceKind::Main,
            WorkspaceArg::Session => WorkspaceKind::Session,
            WorkspaceArg::Run => WorkspaceKind::Run,
            WorkspaceArg::Workflow => WorkspaceKind::Workflow,
        }
    }
}

/// A path successfully resolved into one workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub file_root: PathBuf,
    pub relative_path: String,
    pub ws_type: WorkspaceKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("path escapes every workspace root it could resolve against")]
pub struct OutOfBounds;

/// Reject `.`/`..`/root components outright and hand back the remaining
/// normal components, mirroring the containment rule `prizm-store::fs_store`
/// applies to every Layer 0 operation (invariant 4).
fn normalize_relative(path: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Collapse `.`/`..` lexically (no filesystem access) so an absolute path's
/// containment under a root can be checked even when the target doesn't
/// exist yet.
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn relative_to(root: &Path, absolute: &Path) -> Option<String> {
    let normalized_root = lexically_normalize(root);
    let normalized = lexically_normalize(absolute);
    normalized
        .strip_prefix(&normalized_root)
        .ok()
        .map(|p| p.to_string_lossy().into_owned())
}

/// Resolve a tool-supplied `raw_path` against `ctx`, honoring the optional
/// `workspace` argument for relative paths. Returns `None` (callers turn
/// this into `OUT_OF_BOUNDS`) when the path cannot be located inside any
/// allowed root.
pub fn resolve(ctx: &WorkspaceContext, raw_path: &str, workspace: Option<WorkspaceArg>) -> Option<ResolvedPath> {
    let candidate = Path::new(raw_path);
    if candidate.is_absolute() {
        return resolve_absolute(ctx, candidate);
    }
    resolve_relative(ctx, raw_path, workspace)
}

fn resolve_absolute(ctx: &WorkspaceContext, candidate: &Path) -> Option<ResolvedPath> {
    for kind in ctx.absolute_precedence() {
        if let Some(root) = ctx.root_for(kind) {
            if let Some(relative_path) = relative_to(root, candidate) {
                return Some(ResolvedPath {
                    file_root: root.to_path_buf(),
                    relative_path,
                    ws_type: kind,
                });
            }
        }
    }
    for granted in &ctx.granted_paths {
        if let Some(relative_path) = relative_to(&granted.root, candidate) {
            return Some(ResolvedPath {
                file_root: granted.root.clone(),
                relative_path,
                ws_type: WorkspaceKind::Granted,
            });
        }
    }
    None
}

fn resolve_relative(ctx: &WorkspaceContext, raw_path: &str, workspace: Option<WorkspaceArg>) -> Option<ResolvedPath> {
    let kind = workspace.map(WorkspaceArg::kind).unwrap_or_else(|| ctx.default_relative_kind());
    let root = ctx.root_for(kind)?;
    let normalized = normalize_relative(raw_path)?;
    Some(ResolvedPath {
        file_root: root.to_path_buf(),
        relative_path: normalized.to_string_lossy().into_owned(),
        ws_type: kind,
    })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
