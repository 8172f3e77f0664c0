use crate::error::UploadError;
use crate::upload::{ConvertedLoan, FilePreview};

/// Simulated progress never passes this until the service answers.
pub const PROGRESS_CAP: f32 = 90.0;
/// Exclusive upper bound of one timer step.
pub const MAX_INCREMENT: f32 = 30.0;

/// Cosmetic progress. It moves on a timer, not on anything the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulatedProgress {
    value: f32,
}

impl SimulatedProgress {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Adds one timer step, clamped at [`PROGRESS_CAP`].
    pub fn advance(&mut self, increment: f32) {
        if !increment.is_finite() || increment <= 0.0 {
            return;
        }
        self.value = (self.value + increment).min(PROGRESS_CAP).max(self.value);
    }

    pub fn complete(&mut self) {
        self.value = 100.0;
    }
}

#[derive(Debug, Clone)]
pub struct UploadProgress {
    pub file_name: String,
    pub progress: SimulatedProgress,
    pub preview: Option<FilePreview>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub enum WidgetState {
    #[default]
    Idle,
    Uploading(UploadProgress),
    Settled {
        outcome: Outcome,
        /// Where the bar stopped: 100 after a conversion, 0 for the sample.
        progress: f32,
    },
}

/// What the banner shows.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    None,
    Success(String),
    Error(String),
}

impl WidgetState {
    pub fn uploading(file_name: String) -> Self {
        Self::Uploading(UploadProgress {
            file_name,
            progress: SimulatedProgress::default(),
            preview: None,
        })
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading(_))
    }

    pub fn status(&self) -> UploadStatus {
        match self {
            Self::Settled {
                outcome: Outcome::Success(message),
                ..
            } => UploadStatus::Success(message.clone()),
            Self::Settled {
                outcome: Outcome::Error(message),
                ..
            } => UploadStatus::Error(message.clone()),
            _ => UploadStatus::None,
        }
    }

    pub fn progress(&self) -> f32 {
        match self {
            Self::Idle => 0.0,
            Self::Uploading(upload) => upload.progress.value(),
            Self::Settled { progress, .. } => *progress,
        }
    }

    pub fn preview(&self) -> Option<&FilePreview> {
        match self {
            Self::Uploading(upload) => upload.preview.as_ref(),
            _ => None,
        }
    }

    /// Leaves `Uploading` after the service accepted the document.
    pub fn settle_success(&mut self, message: String) {
        if let Self::Uploading(upload) = self {
            upload.progress.complete();
        }
        *self = Self::Settled {
            progress: self.progress(),
            outcome: Outcome::Success(message),
        };
    }

    /// Leaves `Uploading` with the bar where the timer left it.
    pub fn settle_error(&mut self, message: String) {
        *self = Self::Settled {
            progress: self.progress(),
            outcome: Outcome::Error(message),
        };
    }
}

/// Posted by background tasks and applied on the UI thread.
#[derive(Debug)]
pub enum WidgetEvent {
    Tick {
        generation: u64,
        increment: f32,
    },
    Preview {
        generation: u64,
        preview: FilePreview,
    },
    Settled {
        generation: u64,
        result: Result<ConvertedLoan, UploadError>,
    },
}

impl WidgetEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Tick { generation, .. }
            | Self::Preview { generation, .. }
            | Self::Settled { generation, .. } => *generation,
        }
    }
}

/// Stage lines shown under the progress bar once it passes each threshold.
pub fn stage_messages(progress: f32) -> impl Iterator<Item = &'static str> {
    const STAGES: [(f32, &str); 4] = [
        (20.0, "Parsing document structure..."),
        (40.0, "Extracting loan parameters..."),
        (60.0, "Converting to LoanJSON format..."),
        (80.0, "Validating data integrity..."),
    ];
    STAGES
        .into_iter()
        .filter(move |(threshold, _)| progress > *threshold)
        .map(|(_, message)| message)
}
