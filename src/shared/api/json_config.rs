// src/shared/api/json_config.rs
use crate::shared::api::ApiResponse;
use actix_web::web::JsonConfig;

/// Request bodies above this size are rejected before deserialization.
const MAX_JSON_PAYLOAD: usize = 64 * 1024;

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_JSON_PAYLOAD)
        .error_handler(|err, _req| {
            let message = err.to_string();
            tracing::debug!(error = %message, "Rejected malformed JSON body");
            actix_web::error::InternalError::from_response(
                err,
                ApiResponse::bad_request("INVALID_BODY", &message),
            )
            .into()
        })
}
