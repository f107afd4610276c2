use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use uploader_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, PredictError, Prediction, Predictor, Upload,
};

struct CountingPredictor {
    calls: AtomicUsize,
    reply: Result<Prediction, PredictError>,
}

#[async_trait::async_trait]
impl Predictor for CountingPredictor {
    async fn predict(&self, _upload: &Upload) -> Result<Prediction, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

struct PanickingPredictor;

#[async_trait::async_trait]
impl Predictor for PanickingPredictor {
    async fn predict(&self, _upload: &Upload) -> Result<Prediction, PredictError> {
        panic!("predictor exploded");
    }
}

fn upload() -> Upload {
    Upload {
        file_name: "cat.png".to_string(),
        media_type: "image/png".to_string(),
        payload: bytes::Bytes::from_static(b"png"),
    }
}

fn engine_with(predictor: Arc<dyn Predictor>) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::with_predictor(predictor, Arc::new(ChannelEventSink::new(tx)))
        .expect("engine starts");
    (engine, rx)
}

#[test]
fn submit_emits_exactly_one_completion() {
    uploader_logging::initialize_for_tests();
    let predictor = Arc::new(CountingPredictor {
        calls: AtomicUsize::new(0),
        reply: Ok(Prediction::from_body(200, "cat\n")),
    });
    let (engine, rx) = engine_with(predictor.clone());

    engine.submit(7, upload()).unwrap();

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
    assert_eq!(
        event,
        EngineEvent::PredictionCompleted {
            request_id: 7,
            result: Ok(Prediction::from_body(200, "cat")),
        }
    );
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failures_are_forwarded_with_request_id() {
    uploader_logging::initialize_for_tests();
    let reply = Err(PredictError::HttpStatus {
        status: 500,
        body: "model unavailable".to_string(),
    });
    let predictor = Arc::new(CountingPredictor {
        calls: AtomicUsize::new(0),
        reply: reply.clone(),
    });
    let (engine, rx) = engine_with(predictor);

    engine.submit(3, upload()).unwrap();

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
    assert_eq!(
        event,
        EngineEvent::PredictionCompleted {
            request_id: 3,
            result: reply,
        }
    );
}

#[test]
fn panicking_predictor_still_settles() {
    uploader_logging::initialize_for_tests();
    let (engine, rx) = engine_with(Arc::new(PanickingPredictor));

    engine.submit(1, upload()).unwrap();

    match rx.recv_timeout(Duration::from_secs(5)).expect("completion") {
        EngineEvent::PredictionCompleted {
            request_id: 1,
            result: Err(PredictError::EngineUnavailable(_)),
        } => {}
        other => panic!("unexpected event {other:?}"),
    }
}
