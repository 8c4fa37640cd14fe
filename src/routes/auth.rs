use crate::auth::CurrentUser;
use crate::config::{AuthConfig, Config};
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::session::{SessionPayload, SessionResponse};
use crate::models::user::{LoginRequest, LoginResponse, MessageResponse};
use crate::service::auth::AuthService;
use crate::service::token::TokenSigner;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use sqlx::PgPool;

fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookie)
        .max_age(rocket::time::Duration::seconds(auth.token_ttl_seconds))
        .build()
}

/// Authenticate with email and password; sets the session cookie
#[openapi(tag = "Auth")]
#[post("/login", data = "<payload>")]
pub async fn login(
    pool: &State<PgPool>,
    config: &State<Config>,
    tokens: &State<TokenSigner>,
    cookies: &CookieJar<'_>,
    payload: JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let service = AuthService {
        repo: &repo,
        tokens: tokens.inner(),
    };

    let session = service.login(&payload).await?;
    cookies.add(session_cookie(&config.auth, session.token));

    Ok(Json(LoginResponse { user: session.user }))
}

/// Clear the session cookie
#[openapi(tag = "Auth")]
#[post("/logout")]
pub fn logout(config: &State<Config>, cookies: &CookieJar<'_>) -> Json<MessageResponse> {
    cookies.remove(Cookie::build(config.auth.cookie_name.clone()).path("/").build());
    Json(MessageResponse {
        message: "Sessão encerrada".to_string(),
    })
}

/// Identity carried by the current session token
#[openapi(tag = "Auth")]
#[get("/me")]
pub fn me(current_user: CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: SessionPayload::from(&current_user),
    })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![login, logout, me]
}
