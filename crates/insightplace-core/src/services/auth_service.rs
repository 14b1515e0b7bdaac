//! Login, logout and token authentication.

use serde::Serialize;

use super::ActivityLogger;
use crate::domain::{ActivityType, ClientInfo, Company, NewActivity, User, UserResponse};
use crate::ports::{CoreError, Repos};
use crate::security::{PasswordHasher, TokenIssuer};

const INVALID_LOGIN: &str = "Invalid email or password";
const INVALID_CREDENTIALS: &str = "Could not validate credentials";
const INACTIVE_ACCOUNT: &str = "User account is inactive";

/// Successful login payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
    pub company: Company,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    repos: Repos,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
    activity: ActivityLogger,
}

impl AuthService {
    pub const fn new(
        repos: Repos,
        tokens: TokenIssuer,
        hasher: PasswordHasher,
        activity: ActivityLogger,
    ) -> Self {
        Self {
            repos,
            tokens,
            hasher,
            activity,
        }
    }

    /// Check credentials, record the attempt and issue a token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<LoginOutcome, CoreError> {
        let Some(user) = self.repos.users.get_by_email(email).await? else {
            self.failed_login(None, email, "user not found", client).await;
            return Err(CoreError::Unauthorized(INVALID_LOGIN.to_string()));
        };

        if !user.active {
            self.failed_login(Some(&user), email, "user inactive", client)
                .await;
            return Err(CoreError::Unauthorized(INVALID_LOGIN.to_string()));
        }

        let matches = self
            .hasher
            .verify_async(password.to_string(), user.hashed_password.clone())
            .await;
        if !matches {
            self.failed_login(Some(&user), email, "invalid password", client)
                .await;
            return Err(CoreError::Unauthorized(INVALID_LOGIN.to_string()));
        }

        let now = chrono::Utc::now();
        self.repos.users.record_login(&user.id, now).await?;
        self.activity
            .record(
                NewActivity::new(ActivityType::Login, format!("Successful login for {email}"))
                    .by_user(&user)
                    .from_client(client),
            )
            .await;

        let company = self
            .repos
            .companies
            .get_by_id(&user.company_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Company not found".to_string()))?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        // The account as it was before this login
        let response = UserResponse::from(&user);

        Ok(LoginOutcome {
            access_token: token.token,
            token_type: "bearer",
            user: response,
            company,
        })
    }

    async fn failed_login(
        &self,
        user: Option<&User>,
        email: &str,
        reason: &str,
        client: &ClientInfo,
    ) {
        tracing::warn!(email, reason, ip = %client.ip_address, "Failed login attempt");
        self.activity
            .record(
                NewActivity::new(
                    ActivityType::FailedLogin,
                    format!("Failed login attempt for {email} - {reason}"),
                )
                .by_identity(user.map(|u| u.id.clone()), email)
                .from_client(client),
            )
            .await;
    }

    /// Record a logout. Tokens are stateless, so this is audit only.
    pub async fn logout(&self, user: &User, client: &ClientInfo) {
        self.activity
            .record(
                NewActivity::new(
                    ActivityType::Logout,
                    format!("User logged out: {}", user.email),
                )
                .by_user(user)
                .from_client(client),
            )
            .await;
    }

    /// Resolve a bearer token to an active user.
    pub async fn authenticate(&self, token: &str) -> Result<User, CoreError> {
        let claims = self.tokens.validate(token)?;
        let user = self
            .repos
            .users
            .get_by_id(&claims.user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;
        if !user.active {
            return Err(CoreError::Unauthorized(INACTIVE_ACCOUNT.to_string()));
        }
        Ok(user)
    }
}
