//! Signup and login.

use std::sync::Arc;

use internhub_core::error::CoreError;
use internhub_core::roles::Role;
use internhub_core::validation::{require_fields, validate_email};
use internhub_db::models::user::{CreateUser, PublicUser, User};
use internhub_db::repositories::UserStore;
use internhub_db::StoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::TokenIssuer;
use crate::auth::password::{HashError, PasswordHasher};
use crate::error::{AppError, AppResult};

/// Plaintext hashed once at startup so unknown-email logins still pay for a
/// full verification.
const DUMMY_PASSWORD: &str = "internhub-dummy-password";

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user identity together with a freshly issued token.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub user: PublicUser,
    pub token: String,
}

pub struct CredentialService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
    dummy_digest: String,
}

impl CredentialService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenIssuer>,
    ) -> Result<Self, HashError> {
        let dummy_digest = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            tokens,
            dummy_digest,
        })
    }

    /// Register a new user and sign them in.
    ///
    /// The role defaults to [`Role::Intern`]. The email pre-check is only a
    /// fast path; the store's unique constraint decides concurrent races.
    pub async fn signup(&self, input: SignupRequest) -> AppResult<AuthSession> {
        require_fields(&[
            ("name", input.name.as_deref()),
            ("email", input.email.as_deref()),
            ("password", input.password.as_deref()),
        ])?;
        let name = input.name.unwrap_or_default().trim().to_string();
        let email = input.email.unwrap_or_default().trim().to_string();
        let password = input.password.unwrap_or_default();
        validate_email(&email)?;

        let role = match input.role.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<Role>().map_err(CoreError::from)?,
            _ => Role::default(),
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(CoreError::DuplicateEmail.into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .users
            .create(&CreateUser {
                name,
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation { .. } => AppError::Core(CoreError::DuplicateEmail),
                other => AppError::Store(other),
            })?;

        tracing::info!(user_id = user.id, role = %user.role, "User signed up");

        self.session_for(&user)
    }

    /// Check credentials and issue a fresh token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, input: LoginRequest) -> AppResult<AuthSession> {
        require_fields(&[
            ("email", input.email.as_deref()),
            ("password", input.password.as_deref()),
        ])?;
        let email = input.email.unwrap_or_default().trim().to_string();
        let password = input.password.unwrap_or_default();

        let user = self.users.find_by_email(&email).await?;
        let digest = user
            .as_ref()
            .map_or_else(|| self.dummy_digest.clone(), |u| u.password_hash.clone());

        let matches = self.verify_password(password, digest).await?;
        let user = match user {
            Some(user) if matches => user,
            _ => {
                tracing::info!("Login rejected");
                return Err(CoreError::InvalidCredentials.into());
            }
        };

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");

        self.session_for(&user)
    }

    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        let token = self
            .tokens
            .issue(user.id, &user.email, user.role)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        Ok(AuthSession {
            user: PublicUser::from(user),
            token,
        })
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    async fn verify_password(&self, password: String, digest: String) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;
    use crate::auth::password::WorkFactor;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use internhub_db::memory::MemoryStore;

    /// A store that loses every insert race: the pre-check sees no user, the
    /// insert hits the unique constraint.
    struct LosingRaceUsers;

    #[async_trait]
    impl UserStore for LosingRaceUsers {
        async fn create(&self, _input: &CreateUser) -> Result<User, StoreError> {
            Err(StoreError::UniqueViolation {
                constraint: "uq_users_email".to_string(),
            })
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
    }

    fn service() -> CredentialService {
        service_with(Arc::new(MemoryStore::new()))
    }

    fn service_with(users: Arc<dyn UserStore>) -> CredentialService {
        let hasher = PasswordHasher::new(WorkFactor {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let tokens = Arc::new(TokenIssuer::new(&JwtConfig {
            secret: "credential-test-secret".to_string(),
            expiry_hours: 24,
        }));
        CredentialService::new(users, hasher, tokens).unwrap()
    }

    fn signup_req(email: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: Some("Ann".to_string()),
            email: Some(email.to_string()),
            password: Some("Secret1!".to_string()),
            role: role.map(str::to_string),
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn signup_defaults_to_intern_and_token_matches_user() {
        let svc = service();
        let session = svc.signup(signup_req("ann@x.com", None)).await.unwrap();

        assert_eq!(session.user.role, Role::Intern);
        let claims = svc.tokens.verify(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.role, Role::Intern);
    }

    #[tokio::test]
    async fn signup_accepts_legacy_emp_role() {
        let svc = service();
        let session = svc.signup(signup_req("e@x.com", Some("emp"))).await.unwrap();
        assert_eq!(session.user.role, Role::Employee);
    }

    #[tokio::test]
    async fn signup_rejects_unknown_role() {
        let svc = service();
        assert_matches!(
            svc.signup(signup_req("r@x.com", Some("owner"))).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn signup_lists_missing_fields() {
        let svc = service();
        let result = svc
            .signup(SignupRequest {
                name: Some("  ".to_string()),
                ..Default::default()
            })
            .await;
        assert_matches!(
            result,
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == "Missing required fields: name, email, password"
        );
    }

    #[tokio::test]
    async fn signup_rejects_bad_email() {
        let svc = service();
        assert_matches!(
            svc.signup(signup_req("not-an-email", None)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn second_signup_with_same_email_is_duplicate() {
        let svc = service();
        svc.signup(signup_req("dup@x.com", None)).await.unwrap();
        assert_matches!(
            svc.signup(signup_req("dup@x.com", Some("admin"))).await,
            Err(AppError::Core(CoreError::DuplicateEmail))
        );
    }

    #[tokio::test]
    async fn unique_violation_on_insert_is_duplicate_email() {
        let svc = service_with(Arc::new(LosingRaceUsers));
        assert_matches!(
            svc.signup(signup_req("race@x.com", None)).await,
            Err(AppError::Core(CoreError::DuplicateEmail))
        );
    }

    #[tokio::test]
    async fn concurrent_signups_with_one_email_create_one_user() {
        let svc = service();
        let (a, b) = tokio::join!(
            svc.signup(signup_req("same@x.com", None)),
            svc.signup(signup_req("same@x.com", Some("admin")))
        );

        let created = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!([a, b]
            .into_iter()
            .any(|r| matches!(r, Err(AppError::Core(CoreError::DuplicateEmail)))));
    }

    #[tokio::test]
    async fn stored_digest_is_not_the_password() {
        let svc = service();
        svc.signup(signup_req("h@x.com", None)).await.unwrap();
        let stored = svc.users.find_by_email("h@x.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret1!");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn login_succeeds_with_right_password() {
        let svc = service();
        let signed_up = svc.signup(signup_req("ann@x.com", None)).await.unwrap();

        let session = svc.login(login_req("ann@x.com", "Secret1!")).await.unwrap();
        assert_eq!(session.user, signed_up.user);
        assert_eq!(svc.tokens.verify(&session.token).unwrap().role, Role::Intern);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_the_same_way() {
        let svc = service();
        svc.signup(signup_req("ann@x.com", None)).await.unwrap();

        let wrong = svc.login(login_req("ann@x.com", "nope")).await.unwrap_err();
        let unknown = svc.login(login_req("bob@x.com", "Secret1!")).await.unwrap_err();

        assert_matches!(wrong, AppError::Core(CoreError::InvalidCredentials));
        assert_matches!(unknown, AppError::Core(CoreError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let svc = service();
        assert_matches!(
            svc.login(LoginRequest::default()).await,
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == "Missing required fields: email, password"
        );
    }
}
