// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NotFound(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn chain_not_found(name: &str) -> Self {
        ApiError::NotFound(format!("Chain '{}' not found", name))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message) = match self {
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message: message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

impl From<crate::probe::SchedulerError> for ApiError {
    fn from(err: crate::probe::SchedulerError) -> Self {
        ApiError::ServiceUnavailable(err.to_string())
    }
}
