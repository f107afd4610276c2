use crate::{SelectedFile, SubmissionState};

pub const PREDICT_CAPTION: &str = "Predict";
pub const PREDICTING_CAPTION: &str = "Predicting...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetViewModel {
    /// Drop-target highlight.
    pub dragging: bool,
    pub file: Option<FileSummaryView>,
    pub preview_locator: Option<String>,
    pub predict_enabled: bool,
    pub predict_caption: &'static str,
    pub submission: SubmissionState,
    pub dirty: bool,
}

impl WidgetViewModel {
    pub fn result(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Succeeded(label) => Some(label),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummaryView {
    pub name: String,
    /// Size and type line, e.g. `2.0 KB • image/png`.
    pub details: String,
}

impl FileSummaryView {
    pub(crate) fn from_file(file: &SelectedFile) -> Self {
        Self {
            name: file.name().to_string(),
            details: format!(
                "{:.1} KB • {}",
                file.size() as f64 / 1024.0,
                file.media_type()
            ),
        }
    }
}
