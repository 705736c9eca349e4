use crate::{
    auth::{Credentials, LoginRequest, LoginResponse, TokenService, SESSION_IDENTITY},
    error::{AppError, MSG_INVALID_BODY, MSG_WRONG_CREDENTIALS},
};
use actix_web::{mime, post, web, HttpMessage, HttpRequest, HttpResponse, Responder};

/// Login
///
/// Compares the submitted pair with the configured credentials and, on an
/// exact match, returns a session token valid for one hour.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`
/// - `401 Unauthorized`: `{"message": "Credenciais erradas"}`, for any mismatch or
///   missing field. Empty bodies and bodies not declared as JSON count as missing fields.
/// - `400 Bad Request`: `{"message": "Corpo da requisição inválido"}`, a JSON body that does not parse.
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    credentials: web::Data<Credentials>,
    tokens: web::Data<TokenService>,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let login_data = LoginRequest::from_body(declares_json(&req), &body).map_err(|e| {
        log::warn!("unreadable login body: {}", e);
        AppError::BadRequest(MSG_INVALID_BODY.into())
    })?;

    if !login_data.is_accepted_by(&credentials) {
        log::warn!(
            "failed login attempt for username {:?}",
            login_data.username.as_deref().unwrap_or("")
        );
        return Err(AppError::Unauthorized(MSG_WRONG_CREDENTIALS.into()));
    }

    let token = tokens.issue(SESSION_IDENTITY)?;
    log::info!("issued session token for {}", SESSION_IDENTITY);

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// `application/json` or any `+json` media type.
fn declares_json(req: &HttpRequest) -> bool {
    match req.mime_type() {
        Ok(Some(media)) => {
            media.subtype() == mime::JSON || media.suffix().map_or(false, |s| s == mime::JSON)
        }
        _ => false,
    }
}
