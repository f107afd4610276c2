//! Uploader core: pure widget state machine, input validation and preview lifetimes.
mod acquire;
mod effect;
mod msg;
mod preview;
mod state;
mod submission;
mod update;
mod view_model;

pub use acquire::{
    acquire, FileCandidate, FileId, SelectedFile, ValidationError, NOT_AN_IMAGE_NOTICE,
    PICKER_ACCEPT,
};
pub use effect::Effect;
pub use msg::{Msg, PredictionOutcome};
pub use preview::{PreviewHandle, PreviewId, PreviewManager, PreviewRegistry};
pub use state::WidgetState;
pub use submission::{RequestId, SubmissionController, SubmissionState};
pub use update::update;
pub use view_model::{FileSummaryView, WidgetViewModel, PREDICT_CAPTION, PREDICTING_CAPTION};
