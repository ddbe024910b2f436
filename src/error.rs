use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::ErrorBody;
use crate::predictor::PredictorError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Please upload different image or describe more about your symptoms")]
    InsufficientConfidence,

    #[error(transparent)]
    Predictor(#[from] PredictorError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    /// Short heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Multipart(_) | Self::InsufficientConfidence => {
                "Input Error"
            }
            Self::Predictor(_) | Self::Catalog(_) => "Prediction Error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientConfidence => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Predictor(_) | Self::Catalog(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.title().to_string(),
            message: self.to_string(),
        })
    }
}
