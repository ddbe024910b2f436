use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog;
use crate::error::AppError;
use crate::models::{DiagnosisResponse, ErrorBody};
use crate::predictor::Predictor;
use crate::selector::{self, DiagnosisOutcome};
use crate::validation::{Limits, Submission, ValidationError};

pub struct AppState<P> {
    pub predictor: P,
    pub threshold: f64,
    pub limits: Limits,
}

pub fn configure<P: Predictor + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(predict::<P>)))
        .service(web::resource("/diseases").route(web::get().to(list_diseases)))
        .service(web::resource("/diseases/{label}").route(web::get().to(get_disease)))
        .service(web::resource("/health").route(web::get().to(health)));
}

/// Drains the multipart body into the `image` and `text` fields.
/// Reading stops as soon as either field reaches its size limit; other
/// fields are consumed without being buffered.
async fn read_submission(
    mut payload: Multipart,
    limits: &Limits,
) -> Result<Submission, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut text: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();

        let check: fn(&Limits, usize) -> Result<(), ValidationError> = match name.as_str() {
            "image" => Limits::check_image_size,
            "text" => Limits::check_text_size,
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| AppError::Multipart(e.to_string()))?;
                }
                continue;
            }
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Multipart(e.to_string()))?;
            check(limits, data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }

        if name == "image" {
            image = Some(data);
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| AppError::Multipart("text field is not valid UTF-8".into()))?;
            text = Some(value);
        }
    }

    Ok(limits.validate(image, text)?)
}

pub async fn predict<P: Predictor>(
    state: web::Data<AppState<P>>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    async move {
        let submission = read_submission(payload, &state.limits).await.map_err(|e| {
            tracing::info!(error = %e, "submission rejected");
            e
        })?;
        tracing::debug!(
            image_bytes = submission.image.len(),
            kind = submission.kind.mime(),
            "forwarding submission"
        );

        let results = state.predictor.predict(&submission).await.map_err(|e| {
            tracing::error!(error = %e, "inference call failed");
            AppError::from(e)
        })?;

        let winner = match selector::select(&results, state.threshold) {
            DiagnosisOutcome::Accepted(winner) => winner,
            DiagnosisOutcome::Rejected => {
                tracing::warn!(candidates = results.len(), "no confident prediction");
                return Err(AppError::InsufficientConfidence);
            }
        };

        let disease = catalog::lookup(&winner.label).map_err(|e| {
            tracing::error!(label = %winner.label, "inference returned unknown label");
            AppError::from(e)
        })?;

        tracing::info!(
            class = %winner.label,
            confidence = winner.confidence,
            "diagnosis accepted"
        );
        Ok(HttpResponse::Ok().json(DiagnosisResponse::new(winner, disease)))
    }
    .instrument(span)
    .await
}

pub async fn list_diseases() -> HttpResponse {
    HttpResponse::Ok().json(catalog::all())
}

pub async fn get_disease(label: web::Path<String>) -> HttpResponse {
    match catalog::lookup(&label) {
        Ok(disease) => HttpResponse::Ok().json(disease),
        Err(e) => HttpResponse::NotFound().json(ErrorBody {
            error: "Not Found".to_string(),
            message: e.to_string(),
        }),
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
