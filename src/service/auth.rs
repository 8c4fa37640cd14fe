use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::session::SessionPayload;
use crate::models::user::{CreateUserRequest, LoginRequest, User, UserResponse};
use crate::service::credentials::{dummy_verify, hash_password, verify_password};
use crate::service::token::TokenSigner;
use tracing::{info, warn};
use validator::Validate;

/// Token plus the non-sensitive user fields returned by a successful login.
#[derive(Debug)]
pub struct LoginSession {
    pub token: String,
    pub user: UserResponse,
}

/// Login and registration flows. Independent of the HTTP layer: takes typed
/// requests, returns typed results.
pub struct AuthService<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub tokens: &'a TokenSigner,
}

impl<'a, R: UserRepository + ?Sized> AuthService<'a, R> {
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginSession, AppError> {
        let request = request.normalized();
        request.validate()?;
        let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref()) else {
            return Err(AppError::BadRequest("Email e senha são obrigatórios".to_string()));
        };

        let Some(user) = self.repo.get_user_by_email(email).await? else {
            let password = password.to_string();
            run_blocking(move || dummy_verify(&password)).await?;
            warn!(email = %email, "login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let (candidate, stored) = (password.to_string(), user.password_hash.clone());
        if !run_blocking(move || verify_password(&candidate, &stored)).await? {
            warn!(email = %email, user_id = %user.id, "login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.generate_token(&session_payload(&user))?;
        info!(user_id = %user.id, role = %user.role, "user logged in");

        Ok(LoginSession {
            token,
            user: UserResponse::from(&user),
        })
    }

    pub async fn register(&self, request: &CreateUserRequest) -> Result<UserResponse, AppError> {
        let request = request.normalized();
        request.validate()?;
        let email = request.email.clone();

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::UserAlreadyExists(email));
        }

        let password = request.password.clone();
        let password_hash = run_blocking(move || hash_password(&password)).await??;
        let user = self.repo.create_user(&request.name, &email, &password_hash, request.role).await?;
        info!(user_id = %user.id, role = %user.role, "user created");

        Ok(UserResponse::from(&user))
    }
}

pub fn session_payload(user: &User) -> SessionPayload {
    SessionPayload {
        user_id: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
    }
}

/// Argon2 work runs off the async executor.
async fn run_blocking<T: Send + 'static>(work: impl FnOnce() -> T + Send + 'static) -> Result<T, AppError> {
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::UserRole;
    use crate::test_utils::{MockRepository, test_signer};

    fn login_request(email: Option<&str>, password: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[rocket::async_test]
    async fn login_with_valid_credentials_issues_token() {
        let repo = MockRepository::with_user("Ana", "ana@example.com", "senha123", UserRole::Diretor);
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };

        let session = service.login(&login_request(Some("ana@example.com"), Some("senha123"))).await.unwrap();

        assert_eq!(session.user.email, "ana@example.com");
        assert_eq!(session.user.role, UserRole::Diretor);
        let payload = tokens.verify_token(&session.token).unwrap();
        assert_eq!(payload.user_id, session.user.id.to_string());
        assert_eq!(payload.role, UserRole::Diretor);
    }

    #[rocket::async_test]
    async fn login_email_is_case_insensitive() {
        let repo = MockRepository::with_user("Ana", "ana@example.com", "senha123", UserRole::Analista);
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };

        let session = service.login(&login_request(Some("Ana@Example.com"), Some("senha123"))).await;
        assert!(session.is_ok());
    }

    #[rocket::async_test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let repo = MockRepository::with_user("Ana", "ana@example.com", "senha123", UserRole::Analista);
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };

        let wrong_password = service.login(&login_request(Some("ana@example.com"), Some("errada123"))).await.unwrap_err();
        let unknown_email = service.login(&login_request(Some("bia@example.com"), Some("senha123"))).await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.body().error, unknown_email.body().error);
    }

    #[rocket::async_test]
    async fn missing_fields_fail_before_repository_lookup() {
        let repo = MockRepository::default();
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };

        let missing_password = service.login(&login_request(Some("ana@example.com"), None)).await.unwrap_err();
        let missing_email = service.login(&login_request(None, Some("senha123"))).await.unwrap_err();

        assert!(matches!(missing_password, AppError::ValidationError(_)));
        assert!(matches!(missing_email, AppError::ValidationError(_)));
        assert_eq!(repo.lookups(), 0);
    }

    #[rocket::async_test]
    async fn register_hashes_password_and_rejects_duplicates() {
        let repo = MockRepository::default();
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };
        let request = CreateUserRequest {
            name: " Carla ".to_string(),
            email: "Carla@Example.com".to_string(),
            password: "senha123".to_string(),
            role: UserRole::Supervisor,
        };

        let created = service.register(&request).await.unwrap();
        assert_eq!(created.name, "Carla");
        assert_eq!(created.email, "carla@example.com");

        let stored = repo.get_user_by_email("carla@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "senha123");
        assert!(verify_password("senha123", &stored.password_hash));

        let duplicate = service.register(&request).await.unwrap_err();
        assert!(matches!(duplicate, AppError::UserAlreadyExists(_)));
    }

    #[rocket::async_test]
    async fn login_accepts_email_with_surrounding_spaces() {
        let repo = MockRepository::with_user("Ana", "ana@example.com", "senha123", UserRole::Analista);
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };

        let session = service.login(&login_request(Some("  ana@example.com "), Some("senha123"))).await.unwrap();
        assert_eq!(session.user.email, "ana@example.com");
    }

    #[rocket::async_test]
    async fn register_reports_conflict_when_insert_hits_unique_email() {
        let repo = MockRepository::with_conflicting_insert();
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };
        let request = CreateUserRequest {
            name: "Eva".to_string(),
            email: "eva@example.com".to_string(),
            password: "senha123".to_string(),
            role: UserRole::Analista,
        };

        let error = service.register(&request).await.unwrap_err();
        assert!(matches!(error, AppError::UserAlreadyExists(ref email) if email == "eva@example.com"));
        assert_eq!(rocket::http::Status::from(&error), rocket::http::Status::Conflict);
    }

    #[rocket::async_test]
    async fn registered_user_can_log_in() {
        let repo = MockRepository::default();
        let tokens = test_signer();
        let service = AuthService { repo: &repo, tokens: &tokens };
        let request = CreateUserRequest {
            name: "Davi".to_string(),
            email: "davi@example.com".to_string(),
            password: "senha123".to_string(),
            role: UserRole::Operador,
        };

        service.register(&request).await.unwrap();
        let session = service.login(&login_request(Some("davi@example.com"), Some("senha123"))).await.unwrap();
        assert_eq!(session.user.role, UserRole::Operador);
    }
}
