//! Uploader engine: prediction requests and effect execution off the UI thread.
mod engine;
mod predict;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use predict::{PredictSettings, Predictor, ReqwestPredictor, DEFAULT_ENDPOINT, IMAGE_FIELD};
pub use types::{EngineEvent, PredictError, Prediction, RequestId, Upload};
