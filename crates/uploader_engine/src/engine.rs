use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use uploader_logging::{uploader_error, uploader_info};

use crate::predict::{PredictSettings, Predictor, ReqwestPredictor};
use crate::{EngineEvent, PredictError, RequestId, Upload};

/// Receives engine events on the engine's worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Submit { request_id: RequestId, upload: Upload },
}

/// Runs prediction requests on a background tokio runtime.
///
/// Every accepted `submit` produces exactly one `EngineEvent::PredictionCompleted`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: PredictSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_predictor(Arc::new(ReqwestPredictor::new(settings)), sink)
    }

    pub fn with_predictor(
        predictor: Arc<dyn Predictor>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("uploader-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let predictor = predictor.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(predictor, command, sink.as_ref()).await;
                    });
                }
                uploader_info!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Queues one request. Fails only when the engine thread is gone.
    pub fn submit(&self, request_id: RequestId, upload: Upload) -> Result<(), PredictError> {
        self.cmd_tx
            .send(EngineCommand::Submit { request_id, upload })
            .map_err(|_| PredictError::EngineUnavailable("engine thread has stopped".to_string()))
    }
}

async fn handle_command(
    predictor: Arc<dyn Predictor>,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Submit { request_id, upload } => {
            // A panicking predictor still settles the request.
            let task = tokio::spawn(async move { predictor.predict(&upload).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    uploader_error!(
                        "Prediction task for request {} failed: {}",
                        request_id,
                        err
                    );
                    Err(PredictError::EngineUnavailable(format!(
                        "prediction task failed: {err}"
                    )))
                }
            };
            sink.emit(EngineEvent::PredictionCompleted { request_id, result });
        }
    }
}
