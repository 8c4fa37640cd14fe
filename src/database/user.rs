use crate::database::is_unique_violation;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::role::UserRole;
use crate::models::user::User;

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create_user(&self, name: &str, email: &str, password_hash: &str, role: UserRole) -> Result<User, AppError>;
}

#[async_trait::async_trait]
impl UserRepository for PostgresRepository {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, name: &str, email: &str, password_hash: &str, role: UserRole) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await;

        match user {
            Ok(user) => Ok(user),
            // A concurrent registration won the race past the existence check.
            Err(err) if is_unique_violation(&err) => Err(AppError::UserAlreadyExists(email.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
