use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation_error::ValidationError;

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
        }
    }

    pub fn validation(error: ValidationError) -> Self {
        ErrorResponse {
            error: "Validation error".to_string(),
            details: Some(error.into_fields()),
        }
    }
}
