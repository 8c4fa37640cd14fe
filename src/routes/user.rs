use crate::auth::CurrentUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::role::UserRole;
use crate::models::user::{CreateUserRequest, UserResponse};
use crate::service::auth::AuthService;
use crate::service::token::TokenSigner;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;
use sqlx::PgPool;

fn created(user: UserResponse) -> (Status, Json<UserResponse>) {
    (Status::Created, Json(user))
}

/// Create a user (DIRETOR only)
#[openapi(tag = "Users")]
#[post("/", data = "<payload>")]
pub async fn create_user(
    pool: &State<PgPool>,
    tokens: &State<TokenSigner>,
    current_user: CurrentUser,
    payload: JsonBody<CreateUserRequest>,
) -> Result<(Status, Json<UserResponse>), AppError> {
    current_user.require_role(&[UserRole::Diretor])?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let service = AuthService {
        repo: &repo,
        tokens: tokens.inner(),
    };

    Ok(created(service.register(&payload).await?))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_user]
}
