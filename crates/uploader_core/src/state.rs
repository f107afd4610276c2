use crate::view_model::{FileSummaryView, WidgetViewModel, PREDICTING_CAPTION, PREDICT_CAPTION};
use crate::{
    PredictionOutcome, PreviewManager, PreviewRegistry, RequestId, SelectedFile,
    SubmissionController, SubmissionState,
};

/// Canonical widget state: selection, preview, submission and drag highlight.
#[derive(Debug, Default)]
pub struct WidgetState {
    selected: Option<SelectedFile>,
    preview: PreviewManager,
    submission: SubmissionController,
    dragging: bool,
    dirty: bool,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose previews are tracked in a caller-supplied registry.
    pub fn with_registry(registry: PreviewRegistry) -> Self {
        Self {
            preview: PreviewManager::new(registry),
            ..Self::default()
        }
    }

    pub fn view(&self) -> WidgetViewModel {
        let submission = self.submission.state().clone();
        let submitting = submission == SubmissionState::Submitting;
        WidgetViewModel {
            dragging: self.dragging,
            file: self.selected.as_ref().map(FileSummaryView::from_file),
            preview_locator: self
                .preview
                .current()
                .map(|handle| handle.locator().to_string()),
            predict_enabled: self.selected.is_some() && !submitting,
            predict_caption: if submitting {
                PREDICTING_CAPTION
            } else {
                PREDICT_CAPTION
            },
            submission,
            dirty: self.dirty,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn preview_registry(&self) -> &PreviewRegistry {
        self.preview.registry()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn select(&mut self, file: SelectedFile) {
        self.preview.derive_preview(None);
        self.selected = Some(file);
        self.preview.derive_preview(self.selected.as_ref());
        self.submission.reset();
        self.mark_dirty();
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.preview.derive_preview(None);
        self.submission.reset();
        self.mark_dirty();
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        if self.dragging != dragging {
            self.dragging = dragging;
            self.mark_dirty();
        }
    }

    /// Starts a request for the current file unless none is selected or one is in flight.
    pub(crate) fn begin_submission(&mut self) -> Option<(RequestId, SelectedFile)> {
        let file = self.selected.clone()?;
        let request_id = self.submission.begin()?;
        self.mark_dirty();
        Some((request_id, file))
    }

    pub(crate) fn settle_submission(&mut self, request_id: RequestId, outcome: PredictionOutcome) {
        if self.submission.settle(request_id, outcome) {
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
