//! Client for the remote skin-disease inference endpoint.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::models::ClassificationResult;
use crate::validation::Submission;

pub const DEFAULT_PREDICT_URL: &str = "https://transcendent.my.id/predict";

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Cannot reach inference service at {0}")]
    Connection(String),

    #[error("Inference request timed out after {0}s")]
    Timeout(u64),

    #[error("Inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed inference response: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

#[allow(async_fn_in_trait)]
pub trait Predictor {
    async fn predict(
        &self,
        submission: &Submission,
    ) -> Result<Vec<ClassificationResult>, PredictorError>;
}

pub struct RemotePredictor {
    url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl RemotePredictor {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, PredictorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PredictorError::Http(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_send_error(&self, e: reqwest::Error) -> PredictorError {
        if e.is_connect() {
            PredictorError::Connection(self.url.clone())
        } else if e.is_timeout() {
            PredictorError::Timeout(self.timeout_secs)
        } else {
            PredictorError::Http(e.to_string())
        }
    }
}

fn build_form(submission: &Submission) -> Result<Form, PredictorError> {
    let image = Part::bytes(submission.image.clone())
        .file_name(format!("upload.{}", submission.kind.extension()))
        .mime_str(submission.kind.mime())
        .map_err(|e| PredictorError::Http(e.to_string()))?;

    Ok(Form::new()
        .part("image", image)
        .text("text", submission.text.clone()))
}

pub fn parse_predictions(body: &[u8]) -> Result<Vec<ClassificationResult>, PredictorError> {
    serde_json::from_slice(body).map_err(|e| PredictorError::ResponseParsing(e.to_string()))
}

impl Predictor for RemotePredictor {
    async fn predict(
        &self,
        submission: &Submission,
    ) -> Result<Vec<ClassificationResult>, PredictorError> {
        let form = build_form(submission)?;

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_send_error(e))?;
        parse_predictions(&body)
    }
}

/// Returns a canned response, for handler tests.
#[cfg(test)]
pub struct MockPredictor {
    response: Result<Vec<ClassificationResult>, u16>,
}

#[cfg(test)]
impl MockPredictor {
    pub fn returning(results: Vec<ClassificationResult>) -> Self {
        Self {
            response: Ok(results),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
        }
    }
}

#[cfg(test)]
impl Predictor for MockPredictor {
    async fn predict(
        &self,
        _submission: &Submission,
    ) -> Result<Vec<ClassificationResult>, PredictorError> {
        match &self.response {
            Ok(results) => Ok(results.clone()),
            Err(status) => Err(PredictorError::Status {
                status: *status,
                body: "mock failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ImageKind;
    use actix_multipart::Multipart;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use futures_util::StreamExt;

    fn submission() -> Submission {
        Submission {
            image: crate::validation::tests::PNG_HEADER.to_vec(),
            kind: ImageKind::Png,
            text: "red scaly patches on both elbows".to_string(),
        }
    }

    /// Echoes back which multipart fields arrived, as a single prediction.
    async fn fake_inference(mut payload: Multipart) -> HttpResponse {
        let mut names = Vec::new();
        while let Some(Ok(mut field)) = payload.next().await {
            if let Some(name) = field.content_disposition().get_name() {
                names.push(name.to_string());
            }
            while let Some(chunk) = field.next().await {
                if chunk.is_err() {
                    break;
                }
            }
        }
        HttpResponse::Ok().json(vec![ClassificationResult::new(names.join(","), 0.8)])
    }

    async fn broken_inference() -> HttpResponse {
        HttpResponse::ServiceUnavailable().body("model offline")
    }

    async fn garbage_inference() -> HttpResponse {
        HttpResponse::Ok().body("not json")
    }

    fn spawn_fake_service() -> String {
        let server = HttpServer::new(|| {
            App::new()
                .route("/predict", web::post().to(fake_inference))
                .route("/broken", web::post().to(broken_inference))
                .route("/garbage", web::post().to(garbage_inference))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        format!("http://{addr}")
    }

    #[actix_rt::test]
    async fn sends_image_and_text_fields() {
        let base = spawn_fake_service();
        let predictor = RemotePredictor::new(&format!("{base}/predict"), 5).unwrap();
        let results = predictor.predict(&submission()).await.unwrap();
        assert_eq!(results, vec![ClassificationResult::new("image,text", 0.8)]);
    }

    #[actix_rt::test]
    async fn non_success_status_is_reported() {
        let base = spawn_fake_service();
        let predictor = RemotePredictor::new(&format!("{base}/broken"), 5).unwrap();
        match predictor.predict(&submission()).await {
            Err(PredictorError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "model offline");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[actix_rt::test]
    async fn unparseable_body_is_reported() {
        let base = spawn_fake_service();
        let predictor = RemotePredictor::new(&format!("{base}/garbage"), 5).unwrap();
        assert!(matches!(
            predictor.predict(&submission()).await,
            Err(PredictorError::ResponseParsing(_))
        ));
    }

    #[test]
    fn parses_inference_payload() {
        let body = br#"[{"class":"Acne or Rosacea","confidence":0.91},{"class":"Malignant Lesions","confidence":0.04}]"#;
        let parsed = parse_predictions(body).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], ClassificationResult::new("Acne or Rosacea", 0.91));
    }

    #[test]
    fn non_numeric_confidence_fails_loudly() {
        let body = br#"[{"class":"Acne or Rosacea","confidence":"high"}]"#;
        assert!(matches!(
            parse_predictions(body),
            Err(PredictorError::ResponseParsing(_))
        ));
    }
}
