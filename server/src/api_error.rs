use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use common::games::tictactoe::GameError;

use crate::models::ErrorResponse;

/// Transport wrapper so `GameError` can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::InvalidCoordinates { .. }
            | GameError::CellOccupied { .. }
            | GameError::GameOver => StatusCode::BAD_REQUEST,
            GameError::EngineFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.0.detail().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
