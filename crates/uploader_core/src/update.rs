use uploader_logging::{uploader_debug, uploader_info, uploader_warn};

use crate::{
    acquire, Effect, FileCandidate, Msg, ValidationError, WidgetState, NOT_AN_IMAGE_NOTICE,
    PICKER_ACCEPT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(candidate) => accept_candidate(&mut state, candidate),
        Msg::DropZoneClicked => vec![Effect::OpenFilePicker {
            accept: PICKER_ACCEPT,
        }],
        Msg::DragEnter => {
            state.set_dragging(true);
            vec![Effect::SuppressDefault]
        }
        Msg::DragLeave => {
            state.set_dragging(false);
            Vec::new()
        }
        Msg::Dropped(files) => {
            state.set_dragging(false);
            if files.len() > 1 {
                uploader_debug!("Drop carried {} files; using the first", files.len());
            }
            let mut effects = vec![Effect::SuppressDefault];
            effects.extend(accept_candidate(&mut state, files.into_iter().next()));
            effects
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((request_id, file)) => {
                uploader_info!(
                    "Submitting request {} for {} ({} bytes)",
                    request_id,
                    file.name(),
                    file.size()
                );
                vec![Effect::SubmitPrediction { request_id, file }]
            }
            None => Vec::new(),
        },
        Msg::ClearClicked => {
            state.clear();
            vec![Effect::ResetPicker]
        }
        Msg::PredictionFinished {
            request_id,
            outcome,
        } => {
            state.settle_submission(request_id, outcome);
            Vec::new()
        }
    };

    (state, effects)
}

fn accept_candidate(state: &mut WidgetState, candidate: Option<FileCandidate>) -> Vec<Effect> {
    match acquire(candidate) {
        Ok(file) => {
            uploader_info!(
                "Selected {} ({}, {} bytes)",
                file.name(),
                file.media_type(),
                file.size()
            );
            state.select(file);
            Vec::new()
        }
        Err(ValidationError::NoFile) => Vec::new(),
        Err(err) => {
            uploader_warn!("Rejected selection: {}", err);
            vec![Effect::Alert {
                message: NOT_AN_IMAGE_NOTICE.to_string(),
            }]
        }
    }
}
