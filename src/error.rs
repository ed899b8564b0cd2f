//! Request-boundary error classification.
//!
//! Commands return `Box<dyn Error>`; this module decides what a caller sees:
//! an HTTP-like status and a small JSON body with a length-capped message.

use std::error::Error;

use serde_json::{json, Value};

use crate::auth::AccessDenied;
use crate::resolver::ResolveError;

/// Longest diagnostic message passed through to callers, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A collection is missing from the schema snapshot
    NotFound { collection: String },
    Forbidden { reason: String },
    Internal { message: String },
}

impl ServiceError {
    /// Classify any command error.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        if let Some(ResolveError::CollectionNotFound { name }) = err.downcast_ref::<ResolveError>() {
            return ServiceError::NotFound {
                collection: name.clone(),
            };
        }
        if let Some(denied) = err.downcast_ref::<AccessDenied>() {
            return ServiceError::Forbidden {
                reason: denied.reason.clone(),
            };
        }
        ServiceError::Internal {
            message: truncate_message(&err.to_string(), MAX_MESSAGE_CHARS),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 404,
            ServiceError::Forbidden { .. } => 403,
            ServiceError::Internal { .. } => 500,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ServiceError::NotFound { collection } => json!({ "data": format!("{} not found", collection) }),
            ServiceError::Forbidden { reason } => json!({ "error": truncate_message(reason, MAX_MESSAGE_CHARS) }),
            ServiceError::Internal { message } => json!({ "error": message }),
        }
    }
}

/// Cut `message` to at most `max` characters.
pub fn truncate_message(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        Some((end, _)) => message[..end].to_string(),
        None => message.to_string(),
    }
}
