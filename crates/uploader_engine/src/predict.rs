use std::error::Error as _;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use uploader_logging::{uploader_debug, uploader_info, uploader_warn};

use crate::{PredictError, Prediction, Upload};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/predict";
/// Multipart part name the endpoint reads the image from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct PredictSettings {
    pub endpoint: String,
    pub field_name: String,
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the endpoint indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for PredictSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: IMAGE_FIELD.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, upload: &Upload) -> Result<Prediction, PredictError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPredictor {
    settings: PredictSettings,
}

impl ReqwestPredictor {
    pub fn new(settings: PredictSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, PredictError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(map_reqwest_error)
    }

    fn build_form(&self, upload: &Upload) -> Result<Form, PredictError> {
        let part = Part::bytes(upload.payload.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.media_type)
            .map_err(|err| PredictError::InvalidUpload(err.to_string()))?;
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }
}

#[async_trait::async_trait]
impl Predictor for ReqwestPredictor {
    async fn predict(&self, upload: &Upload) -> Result<Prediction, PredictError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            PredictError::InvalidEndpoint {
                endpoint: self.settings.endpoint.clone(),
                reason: err.to_string(),
            }
        })?;
        let client = self.build_client()?;
        let form = self.build_form(upload)?;

        uploader_debug!(
            "POST {} with {} ({} bytes, {})",
            endpoint,
            upload.file_name,
            upload.payload.len(),
            upload.media_type
        );
        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is treated as empty.
            let body = response.text().await.unwrap_or_default();
            uploader_warn!("Prediction failed with {}: {:?}", status, body);
            return Err(PredictError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let prediction = Prediction::from_body(status.as_u16(), &body);
        uploader_info!("Prediction {} -> {:?}", status, prediction.label);
        Ok(prediction)
    }
}

/// Flattens the error and its source chain into one description.
fn map_reqwest_error(err: reqwest::Error) -> PredictError {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    PredictError::Transport(description)
}
