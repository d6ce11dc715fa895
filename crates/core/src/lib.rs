// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-core: shared entity types, identifiers, and error codes for the
//! Prizm personal knowledge and agent workbench engine.

pub mod clipboard;
pub mod clock;
pub mod document;
pub mod errors;
pub mod events;
pub mod id;
pub mod resource;
pub mod schedule;
pub mod session;
pub mod todo;
pub mod token_usage;
pub mod version;

pub use clipboard::{ClipboardItem, ClipboardItemType};
pub use clock::{Clock, FakeClock, SharedClock, SystemClock};
pub use document::Document;
pub use errors::{CoreError, CoreResult, ErrorCode};
pub use events::{Event, LockAction};
pub use id::{
    ClipboardItemId, DocumentId, IdGen, RunId, ScheduleId, ScopeId, SequentialIdGen, SessionId,
    ShortId, TodoItemId, TodoListId, UuidIdGen, WorkflowName,
};
pub use resource::{ResourceRef, ResourceType, WorkspaceKind};
pub use schedule::{ScheduleItem, ScheduleItemType, ScheduleStatus};
pub use session::{AgentSession, MessageRole, SessionMessage};
pub use todo::{TodoItem, TodoList, TodoStatus};
pub use token_usage::{TokenUsageRecord, UsageScope};
pub use version::DocumentVersion;
