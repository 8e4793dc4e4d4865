use flota_model::ExportFormat;

/// Single-slot export job state. The active format stays inspectable so a
/// host can show the right loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running(ExportFormat),
}

/// The single-flight guard: at most one export job per dialog instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportJob {
    state: JobState,
}

impl ExportJob {
    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == JobState::Idle
    }

    /// The format currently running, if any.
    pub fn active(&self) -> Option<ExportFormat> {
        match self.state {
            JobState::Idle => None,
            JobState::Running(format) => Some(format),
        }
    }

    /// Claim the job slot. Returns `false` (and changes nothing) if a job
    /// is already running.
    pub fn try_start(&mut self, format: ExportFormat) -> bool {
        if self.is_idle() {
            self.state = JobState::Running(format);
            true
        } else {
            false
        }
    }

    /// Release the slot; settlement happens on success and failure alike.
    pub fn finish(&mut self) {
        self.state = JobState::Idle;
    }
}
