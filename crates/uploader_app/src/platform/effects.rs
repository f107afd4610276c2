use std::io;
use std::sync::{mpsc, Arc};

use uploader_core::{Effect, Msg, SelectedFile};
use uploader_engine::{EngineEvent, EngineHandle, EventSink, PredictSettings, Upload};
use uploader_logging::{uploader_error, uploader_trace, uploader_warn};

use super::app::AppEvent;

/// The native side of the widget: picker, alerts and default drag handling.
pub trait HostSurface {
    fn open_file_picker(&mut self, accept: &str);
    fn reset_picker(&mut self);
    fn alert(&mut self, message: &str);
    fn suppress_default(&mut self) {
        uploader_trace!("Default drag handling suppressed");
    }
}

/// Turns engine completions into widget messages on the app's event channel.
struct AppEventSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for AppEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Ui(completion_msg(event)));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: PredictSettings, tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let sink = Arc::new(AppEventSink { tx: tx.clone() });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine, tx })
    }

    #[cfg(test)]
    pub fn with_predictor(
        predictor: Arc<dyn uploader_engine::Predictor>,
        tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let sink = Arc::new(AppEventSink { tx: tx.clone() });
        let engine = EngineHandle::with_predictor(predictor, sink)?;
        Ok(Self { engine, tx })
    }

    pub fn run(&self, effects: Vec<Effect>, surface: &mut dyn HostSurface) {
        for effect in effects {
            match effect {
                Effect::OpenFilePicker { accept } => surface.open_file_picker(accept),
                Effect::SuppressDefault => surface.suppress_default(),
                Effect::Alert { message } => surface.alert(&message),
                Effect::ResetPicker => surface.reset_picker(),
                Effect::SubmitPrediction { request_id, file } => {
                    if let Err(err) = self.engine.submit(request_id, upload_for(&file)) {
                        // Settle locally so the widget does not stay in Submitting.
                        uploader_error!("Could not submit request {}: {}", request_id, err);
                        let _ = self.tx.send(AppEvent::Ui(Msg::PredictionFinished {
                            request_id,
                            outcome: Err(err.message()),
                        }));
                    }
                }
            }
        }
    }
}

fn upload_for(file: &SelectedFile) -> Upload {
    Upload {
        file_name: file.name().to_string(),
        media_type: file.media_type().to_string(),
        payload: file.payload().clone(),
    }
}

pub(crate) fn completion_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PredictionCompleted { request_id, result } => Msg::PredictionFinished {
            request_id,
            outcome: result.map(|prediction| prediction.label).map_err(|err| {
                uploader_warn!("Request {} failed: {}", request_id, err);
                err.message()
            }),
        },
    }
}
