use crate::{FileCandidate, RequestId};

/// Settled prediction: the label on success, the display message on failure.
pub type PredictionOutcome = Result<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Native picker reported a change; `None` when nothing was chosen.
    FileChosen(Option<FileCandidate>),
    /// Click on the drop zone that no nested control absorbed.
    DropZoneClicked,
    /// Files are being dragged over the drop zone.
    DragEnter,
    /// The drag left the drop zone without dropping.
    DragLeave,
    /// Files were dropped; only the first one is considered.
    Dropped(Vec<FileCandidate>),
    /// User clicked Predict.
    SubmitClicked,
    /// User clicked Clear.
    ClearClicked,
    /// Engine settled a prediction request.
    PredictionFinished {
        request_id: RequestId,
        outcome: PredictionOutcome,
    },
}
