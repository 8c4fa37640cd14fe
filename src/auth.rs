use crate::config::{Config, DEFAULT_COOKIE_NAME};
use crate::error::app_error::AppError;
use crate::models::role::UserRole;
use crate::models::session::SessionPayload;
use crate::service::token::TokenSigner;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{Object, Responses, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&self.role) { Ok(()) } else { Err(AppError::Forbidden) }
    }
}

impl From<SessionPayload> for CurrentUser {
    fn from(payload: SessionPayload) -> Self {
        Self {
            id: payload.user_id,
            email: payload.email,
            role: payload.role,
        }
    }
}

impl From<&CurrentUser> for SessionPayload {
    fn from(user: &CurrentUser) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

pub(crate) fn parse_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let signer = match req.rocket().state::<TokenSigner>() {
            Some(signer) => signer,
            None => return Outcome::Error((Status::InternalServerError, AppError::Internal("TokenSigner is not managed".to_string()))),
        };
        let cookie_name = req
            .rocket()
            .state::<Config>()
            .map(|config| config.auth.cookie_name.as_str())
            .unwrap_or(DEFAULT_COOKIE_NAME);

        let token = req
            .cookies()
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| req.headers().get_one("Authorization").and_then(parse_bearer_token).map(str::to_string));

        match token.as_deref().and_then(|token| signer.verify_token(token)) {
            Some(payload) => {
                let current_user = CurrentUser::from(payload);
                req.local_cache(|| Some(current_user.clone()));
                Outcome::Success(current_user)
            }
            None => Outcome::Error((Status::Unauthorized, AppError::Unauthorized)),
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for CurrentUser {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        let security_scheme = SecurityScheme {
            description: Some("Cookie-based authentication. Log in via POST /api/auth/login to obtain the session cookie.".to_string()),
            data: SecuritySchemeData::ApiKey {
                name: DEFAULT_COOKIE_NAME.to_string(),
                location: "cookie".to_string(),
            },
            extensions: Object::default(),
        };

        let mut security_req = SecurityRequirement::new();
        security_req.insert("cookieAuth".to_string(), Vec::new());

        Ok(RequestHeaderInput::Security("cookieAuth".to_string(), security_scheme, security_req))
    }

    fn get_responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response};
        let mut responses = Responses::default();
        responses.responses.insert(
            "401".to_string(),
            RefOr::Object(Response {
                description: "Unauthorized - Authentication required".to_string(),
                ..Default::default()
            }),
        );
        Ok(responses)
    }
}
