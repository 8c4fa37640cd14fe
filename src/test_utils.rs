use crate::config::Config;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::role::UserRole;
use crate::models::session::SessionPayload;
use crate::models::user::User;
use crate::service::credentials::hash_password;
use crate::service::token::TokenSigner;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory stand-in for the users table.
#[derive(Default)]
pub struct MockRepository {
    users: Mutex<Vec<User>>,
    lookups: AtomicUsize,
    reject_inserts: AtomicBool,
}

impl MockRepository {
    pub fn with_user(name: &str, email: &str, password: &str, role: UserRole) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().push(User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            created_at: Utc::now(),
        });
        repo
    }

    /// Lookups find nothing but every insert hits the unique email constraint,
    /// as when another request registers the same email in between.
    pub fn with_conflicting_insert() -> Self {
        let repo = Self::default();
        repo.reject_inserts.store(true, Ordering::SeqCst);
        repo
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserRepository for MockRepository {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().iter().find(|user| user.email == email).cloned())
    }

    async fn create_user(&self, name: &str, email: &str, password_hash: &str, role: UserRole) -> Result<User, AppError> {
        if self.reject_inserts.load(Ordering::SeqCst) {
            return Err(AppError::UserAlreadyExists(email.to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

pub fn test_signer() -> TokenSigner {
    TokenSigner::from_config(&Config::default().auth)
}

/// Token accepted by a server built from `Config::default()`.
pub fn token_for(role: UserRole) -> String {
    let payload = SessionPayload {
        user_id: Uuid::new_v4().to_string(),
        email: format!("{}@example.com", role.as_str().to_lowercase()),
        role,
    };
    test_signer().generate_token(&payload).unwrap()
}
