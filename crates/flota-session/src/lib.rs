//! Export dialog orchestration.
//!
//! An [`ExportSession`] owns the transient state behind one export dialog:
//! the editable column model, document metadata, the row scope, and a
//! single-slot job state machine that guarantees at most one export runs
//! at a time. All state is rebuilt from the caller's defaults every time
//! the dialog opens; nothing is persisted.

mod job;
mod preview;
mod session;

pub use job::{ExportJob, JobState};
pub use preview::{PREVIEW_ROW_LIMIT, Preview};
pub use session::{ExportOutcome, ExportSession, SessionDefaults, SessionError};
