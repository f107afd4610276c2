use crate::{RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the native file picker filtered by `accept`.
    OpenFilePicker { accept: &'static str },
    /// Keep the host from handling the drag/drop itself (e.g. navigating to the file).
    SuppressDefault,
    /// Show a blocking alert-style notice.
    Alert { message: String },
    /// Issue exactly one multipart prediction request for `file`.
    SubmitPrediction {
        request_id: RequestId,
        file: SelectedFile,
    },
    /// Clear the native picker's selection so the same file can be chosen again.
    ResetPicker,
}
