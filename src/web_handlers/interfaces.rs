use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::interfaces::converter::{convert_tokens, split_tokens};
use crate::Settings;

/// Body of a conversion request
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ConvertRequest {
    /// Share links separated by commas or newlines
    #[serde(default)]
    pub input: String,
}

/// Envelope for request-level failures
#[derive(Serialize, Debug)]
struct ApiError<'a> {
    error: &'a str,
}

/// Build a JSON error response
pub fn api_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiError { error: message })
}

/// JSON extractor configuration enforcing the request body limit
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(|err, _req| {
            let response = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    api_error(StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
                }
                _ => api_error(StatusCode::BAD_REQUEST, "invalid JSON body"),
            };
            debug!("Rejected convert request body: {}", err);
            InternalError::from_response(err, response).into()
        })
}

/// Handler for link conversion
pub async fn convert_handler(
    body: web::Json<ConvertRequest>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let request = body.into_inner();
    debug!("Received convert request of {} bytes", request.input.len());

    if request.input.len() > settings.max_body_bytes {
        warn!("Rejected convert request: input too large");
        return api_error(StatusCode::BAD_REQUEST, "input too large");
    }

    let tokens = split_tokens(&request.input);
    if tokens.len() > settings.max_tokens {
        warn!(
            "Rejected convert request: {} items exceed limit {}",
            tokens.len(),
            settings.max_tokens
        );
        return api_error(
            StatusCode::BAD_REQUEST,
            &format!("too many items (max {})", settings.max_tokens),
        );
    }

    HttpResponse::Ok().json(convert_tokens(&tokens))
}

/// Any method other than POST on the convert endpoint
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ApiError {
            error: "method not allowed",
        })
}

/// Register the API endpoints with Actix Web
pub fn config(settings: Settings) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let limit = settings.max_body_bytes;
        cfg.app_data(web::Data::new(settings)).service(
            web::resource("/api/convert")
                .app_data(json_config(limit))
                .route(web::post().to(convert_handler))
                .default_service(web::to(method_not_allowed)),
        );
    }
}
