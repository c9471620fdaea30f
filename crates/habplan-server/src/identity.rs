//! User accounts — signup, login, and token-gated profile lookup.
//!
//! Accounts live behind the injected [`UserRepo`] so the service is
//! testable without a process-wide store. Tokens are opaque bearer
//! strings with a fixed TTL; expiry checks take the current instant as a
//! parameter internally, so tests never sleep. This collaborator is fully
//! independent of the design store — accounts and saved designs are not
//! associated.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Bearer token lifetime.
const TOKEN_TTL_HOURS: i64 = 2;

/// A stored account. Password material never leaves this struct.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Hex-encoded blake3 hash of salt‖password.
    pub password_hash: String,
    /// Hex-encoded per-account random salt.
    pub salt: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserAccount> for UserProfile {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

/// Account repository abstraction — add and the two lookups the service
/// needs, nothing more.
pub trait UserRepo {
    fn add(&mut self, account: UserAccount);
    fn find_by_email(&self, email: &str) -> Option<&UserAccount>;
    fn find_by_id(&self, id: u64) -> Option<&UserAccount>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Public projections of every account, in insertion order.
    fn profiles(&self) -> Vec<UserProfile>;
}

/// In-memory repository.
#[derive(Default)]
pub struct MemoryUserRepo {
    users: Vec<UserAccount>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepo for MemoryUserRepo {
    fn add(&mut self, account: UserAccount) {
        self.users.push(account);
    }

    fn find_by_email(&self, email: &str) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.email == email)
    }

    fn find_by_id(&self, id: u64) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.id == id)
    }

    fn len(&self) -> usize {
        self.users.len()
    }

    fn profiles(&self) -> Vec<UserProfile> {
        self.users.iter().map(UserProfile::from).collect()
    }
}

/// Authentication failures, each with its distinct user-facing message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("All fields required")]
    MissingFields,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid email")]
    UnknownEmail,
    #[error("Invalid password")]
    WrongPassword,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
}

/// Successful signup/login response: profile plus bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthGrant {
    pub message: &'static str,
    pub user: UserProfile,
    pub token: String,
}

struct TokenGrant {
    user_id: u64,
    expires_at: DateTime<Utc>,
}

/// Signup/login/profile over an injected account repository.
pub struct IdentityService<R: UserRepo> {
    repo: R,
    tokens: HashMap<String, TokenGrant>,
    token_ttl: Duration,
    next_user_id: u64,
    rng: StdRng,
}

impl<R: UserRepo> IdentityService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_seed(repo, rand::random())
    }

    /// Deterministic salts for tests and the headless harness.
    pub fn with_seed(repo: R, seed: u64) -> Self {
        Self {
            repo,
            tokens: HashMap::new(),
            token_ttl: Duration::hours(TOKEN_TTL_HOURS),
            next_user_id: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Register a new account and log it in.
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        self.signup_at(name, email, password, Utc::now())
    }

    fn signup_at(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthGrant, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if self.repo.find_by_email(email).is_some() {
            log::warn!("signup rejected: email already registered");
            return Err(AuthError::EmailTaken);
        }

        let salt_bytes: [u8; 16] = self.rng.gen();
        let salt = to_hex(&salt_bytes);
        let password_hash = hash_password(&salt, password);

        let account = UserAccount {
            id: self.next_user_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            salt,
            created_at: now,
        };
        self.next_user_id += 1;

        let user = UserProfile::from(&account);
        self.repo.add(account);
        let token = self.issue_token_at(user.id, now);
        log::debug!("account {} created", user.id);

        Ok(AuthGrant {
            message: "Signup successful",
            user,
            token,
        })
    }

    /// Authenticate with email and password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        self.login_at(email, password, Utc::now())
    }

    fn login_at(
        &mut self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthGrant, AuthError> {
        let account = self
            .repo
            .find_by_email(email)
            .ok_or(AuthError::UnknownEmail)?;
        if hash_password(&account.salt, password) != account.password_hash {
            log::warn!("login rejected for account {}", account.id);
            return Err(AuthError::WrongPassword);
        }

        let user = UserProfile::from(account);
        let token = self.issue_token_at(user.id, now);
        Ok(AuthGrant {
            message: "Login successful",
            user,
            token,
        })
    }

    /// Look up the profile behind a bearer token.
    pub fn profile(&mut self, token: Option<&str>) -> Result<UserProfile, AuthError> {
        self.profile_at(token, Utc::now())
    }

    fn profile_at(
        &mut self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let grant = self.tokens.get(token).ok_or(AuthError::InvalidToken)?;
        let (user_id, expires_at) = (grant.user_id, grant.expires_at);
        if now > expires_at {
            self.tokens.remove(token);
            return Err(AuthError::InvalidToken);
        }
        self.repo
            .find_by_id(user_id)
            .map(UserProfile::from)
            .ok_or(AuthError::UserNotFound)
    }

    /// Public projections of every account (debug listing).
    pub fn list_profiles(&self) -> Vec<UserProfile> {
        self.repo.profiles()
    }

    fn issue_token_at(&mut self, user_id: u64, now: DateTime<Utc>) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(
            token.clone(),
            TokenGrant {
                user_id,
                expires_at: now + self.token_ttl,
            },
        );
        token
    }
}

fn hash_password(salt_hex: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> IdentityService<MemoryUserRepo> {
        IdentityService::with_seed(MemoryUserRepo::new(), 42)
    }

    #[test]
    fn test_signup_creates_account_and_token() {
        let mut svc = service();
        let grant = svc.signup("Ada", "ada@example.com", "hunter2").unwrap();
        assert_eq!(grant.message, "Signup successful");
        assert_eq!(grant.user.name, "Ada");
        assert!(!grant.token.is_empty());
        assert_eq!(svc.repo().len(), 1);
    }

    #[test]
    fn test_signup_requires_all_fields() {
        let mut svc = service();
        assert_eq!(
            svc.signup("", "ada@example.com", "x").unwrap_err(),
            AuthError::MissingFields
        );
        assert_eq!(
            svc.signup("Ada", "  ", "x").unwrap_err(),
            AuthError::MissingFields
        );
        assert_eq!(
            svc.signup("Ada", "ada@example.com", "").unwrap_err(),
            AuthError::MissingFields
        );
        assert!(svc.repo().is_empty());
    }

    #[test]
    fn test_duplicate_email_rejected_first_account_intact() {
        let mut svc = service();
        svc.signup("Ada", "ada@example.com", "hunter2").unwrap();
        let err = svc.signup("Eve", "ada@example.com", "other").unwrap_err();
        assert_eq!(err, AuthError::EmailTaken);
        assert_eq!(err.to_string(), "Email already registered");

        assert_eq!(svc.repo().len(), 1);
        // Original credentials still work.
        assert!(svc.login("ada@example.com", "hunter2").is_ok());
    }

    #[test]
    fn test_login_distinguishes_email_and_password_failures() {
        let mut svc = service();
        svc.signup("Ada", "ada@example.com", "hunter2").unwrap();

        assert_eq!(
            svc.login("nobody@example.com", "hunter2").unwrap_err(),
            AuthError::UnknownEmail
        );
        assert_eq!(
            svc.login("ada@example.com", "wrong").unwrap_err(),
            AuthError::WrongPassword
        );

        let grant = svc.login("ada@example.com", "hunter2").unwrap();
        assert_eq!(grant.message, "Login successful");
    }

    #[test]
    fn test_password_is_not_stored_in_clear() {
        let mut svc = service();
        svc.signup("Ada", "ada@example.com", "hunter2").unwrap();
        let account = svc.repo().find_by_email("ada@example.com").unwrap();
        assert_ne!(account.password_hash, "hunter2");
        assert!(!account.salt.is_empty());
        // Same password, different salt ⇒ different hash.
        let other = hash_password("00ff", "hunter2");
        assert_ne!(account.password_hash, other);
    }

    #[test]
    fn test_profile_roundtrip() {
        let mut svc = service();
        let grant = svc.signup("Ada", "ada@example.com", "hunter2").unwrap();
        let profile = svc.profile(Some(grant.token.as_str())).unwrap();
        assert_eq!(profile, grant.user);
    }

    #[test]
    fn test_profile_token_errors() {
        let mut svc = service();
        assert_eq!(svc.profile(None).unwrap_err(), AuthError::MissingToken);
        assert_eq!(
            svc.profile(Some("not-a-token")).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let mut svc = service();
        let now = Utc::now();
        let grant = svc
            .signup_at("Ada", "ada@example.com", "hunter2", now)
            .unwrap();

        // Just inside the window.
        let almost = now + Duration::hours(TOKEN_TTL_HOURS) - Duration::seconds(1);
        assert!(svc.profile_at(Some(grant.token.as_str()), almost).is_ok());

        // Past it: rejected, and the token is gone for good.
        let late = now + Duration::hours(TOKEN_TTL_HOURS) + Duration::seconds(1);
        assert_eq!(
            svc.profile_at(Some(grant.token.as_str()), late).unwrap_err(),
            AuthError::InvalidToken
        );
        assert_eq!(
            svc.profile_at(Some(grant.token.as_str()), now).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_tokens_are_unique_per_grant() {
        let mut svc = service();
        let a = svc.signup("Ada", "ada@example.com", "hunter2").unwrap();
        let b = svc.login("ada@example.com", "hunter2").unwrap();
        assert_ne!(a.token, b.token);
        // Both remain valid.
        assert!(svc.profile(Some(a.token.as_str())).is_ok());
        assert!(svc.profile(Some(b.token.as_str())).is_ok());
    }

    #[test]
    fn test_list_profiles() {
        let mut svc = service();
        svc.signup("Ada", "ada@example.com", "a").unwrap();
        svc.signup("Grace", "grace@example.com", "b").unwrap();
        let profiles = svc.list_profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, 1);
        assert_eq!(profiles[1].name, "Grace");
    }
}
