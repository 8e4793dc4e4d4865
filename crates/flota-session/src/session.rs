//! The export dialog's state holder and dispatcher.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use flota_model::{
    ColumnEdit, ColumnHint, ColumnSet, ExportFormat, ExportMetadata, ExportRequest, FooterColor,
    Orientation, RowRecord, RowScope, resolve_scope,
};
use flota_render::{ArtifactSink, RenderError, render};

use crate::job::{ExportJob, JobState};
use crate::preview::Preview;

#[derive(Debug, Error)]
pub enum SessionError {
    /// An edit or dispatch arrived while an export was running.
    #[error("an export is already running")]
    ExportRunning,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("artifact delivery failed: {0}")]
    Deliver(#[from] io::Error),
}

/// Caller-supplied defaults the session resets to on every open.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub title: String,
    pub filename_base: String,
    pub sheet_name: String,
    pub orientation: Orientation,
    pub footer_color: FooterColor,
    pub include_generated_timestamp: bool,
    pub logo_path: Option<PathBuf>,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        let metadata = ExportMetadata::default();
        Self {
            title: metadata.title,
            filename_base: metadata.filename_base,
            sheet_name: metadata.sheet_name,
            orientation: metadata.orientation,
            footer_color: metadata.footer_color,
            include_generated_timestamp: metadata.include_generated_timestamp,
            logo_path: metadata.logo_path,
        }
    }
}

impl SessionDefaults {
    fn metadata(&self) -> ExportMetadata {
        ExportMetadata {
            title: self.title.clone(),
            filename_base: self.filename_base.clone(),
            sheet_name: self.sheet_name.clone(),
            orientation: self.orientation,
            footer_color: self.footer_color,
            include_generated_timestamp: self.include_generated_timestamp,
            logo_path: self.logo_path.clone(),
        }
    }
}

/// Result of a one-call dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Completed { filename: String },
    /// A job was already in flight; nothing was rendered or delivered.
    AlreadyRunning(ExportFormat),
}

/// Transient state of one export dialog instance.
///
/// Owned exclusively by its host; there is no module-level state, so two
/// dialogs never share columns or metadata.
#[derive(Debug)]
pub struct ExportSession {
    defaults: SessionDefaults,
    hints: Vec<ColumnHint>,
    rows: Vec<RowRecord>,
    page_rows: Vec<RowRecord>,
    columns: ColumnSet,
    metadata: ExportMetadata,
    scope: RowScope,
    job: ExportJob,
}

impl ExportSession {
    /// Open the dialog: all fields take the caller's defaults and the
    /// column model is rebuilt from the hints.
    pub fn open(
        defaults: SessionDefaults,
        hints: Vec<ColumnHint>,
        rows: Vec<RowRecord>,
        page_rows: Vec<RowRecord>,
    ) -> Self {
        let columns = ColumnSet::from_hints(&hints);
        let metadata = defaults.metadata();
        Self {
            defaults,
            hints,
            rows,
            page_rows,
            columns,
            metadata,
            scope: RowScope::All,
            job: ExportJob::default(),
        }
    }

    /// Reset every user edit back to the defaults, as reopening the dialog
    /// does. Rows are kept; column edits, metadata and scope are discarded.
    /// Refused while an export runs, like any other edit, so a job slot
    /// claimed through [`ExportSession::begin_export`] stays claimed.
    pub fn reopen(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.columns = ColumnSet::from_hints(&self.hints);
        self.metadata = self.defaults.metadata();
        self.scope = RowScope::All;
        Ok(())
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn metadata(&self) -> &ExportMetadata {
        &self.metadata
    }

    pub fn scope(&self) -> RowScope {
        self.scope
    }

    pub fn job_state(&self) -> JobState {
        self.job.state()
    }

    /// The dialog's close control is disabled while an export runs.
    pub fn can_close(&self) -> bool {
        self.job.is_idle()
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.job.is_idle() {
            Ok(())
        } else {
            Err(SessionError::ExportRunning)
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.title = title.into();
        Ok(())
    }

    pub fn set_filename_base(&mut self, base: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.filename_base = base.into();
        Ok(())
    }

    pub fn set_sheet_name(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.sheet_name = name.into();
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.orientation = orientation;
        Ok(())
    }

    pub fn set_footer_color(&mut self, color: FooterColor) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.footer_color = color;
        Ok(())
    }

    pub fn set_include_timestamp(&mut self, include: bool) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.metadata.include_generated_timestamp = include;
        Ok(())
    }

    pub fn set_scope(&mut self, scope: RowScope) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.scope = scope;
        Ok(())
    }

    pub fn move_column(&mut self, index: usize, direction: isize) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.columns.move_column(index, direction);
        Ok(())
    }

    pub fn edit_column(&mut self, index: usize, edit: ColumnEdit) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.columns.set_field(index, edit);
        Ok(())
    }

    /// The formatted first-rows preview of the resolved scope. Available
    /// in every state, including while an export runs.
    pub fn preview(&self) -> Preview {
        let rows = resolve_scope(&self.rows, &self.page_rows, self.scope);
        let columns: Vec<_> = self.columns.enabled_columns().collect();
        Preview::project(rows, &columns)
    }

    /// Snapshot the current state into a request for one renderer call.
    fn snapshot_request(&self) -> ExportRequest {
        let rows = resolve_scope(&self.rows, &self.page_rows, self.scope).to_vec();
        ExportRequest::new(rows, &self.columns, self.metadata.clone())
    }

    /// Two-phase dispatch for hosts that render on a background task:
    /// claims the job slot and hands back the request snapshot. The host
    /// must call [`ExportSession::complete_export`] when the render
    /// settles, successfully or not.
    pub fn begin_export(&mut self, format: ExportFormat) -> Result<ExportRequest, SessionError> {
        if !self.job.try_start(format) {
            return Err(SessionError::ExportRunning);
        }
        Ok(self.snapshot_request())
    }

    /// Release the job slot after a render settles.
    pub fn complete_export(&mut self) {
        self.job.finish();
    }

    /// One-call dispatch: render the current state in `format` and deliver
    /// the artifact. A second call while a job runs is a logged no-op; a
    /// renderer or delivery failure releases the job slot and leaves the
    /// session editable for retry.
    pub fn export(
        &mut self,
        format: ExportFormat,
        now: DateTime<Utc>,
        sink: &mut dyn ArtifactSink,
    ) -> Result<ExportOutcome, SessionError> {
        if let Some(active) = self.job.active() {
            warn!(requested = %format, running = %active, "export already running, ignoring");
            return Ok(ExportOutcome::AlreadyRunning(active));
        }
        let request = self.begin_export(format)?;
        let settled = render(&request, format, now)
            .map_err(SessionError::from)
            .and_then(|artifact| {
                let filename = artifact.filename.clone();
                sink.deliver(artifact)?;
                Ok(filename)
            });
        self.complete_export();

        match settled {
            Ok(filename) => {
                info!(%format, rows = request.rows.len(), filename = %filename, "export completed");
                Ok(ExportOutcome::Completed { filename })
            }
            Err(err) => {
                error!(%format, %err, "export failed");
                Err(err)
            }
        }
    }
}
