//! Port implementations backed by plain collections, for exercising the auth
//! flows end to end without a database, Redis or SMTP.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtSessionTokenService, SessionConfig};
use crate::auth::application::domain::entities::{
    AuthToken, LinkedAccount, NewUser, TokenKind, TwoFactorConfirmation, User, UserRole,
};
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, ConfirmationRepositoryError, HashError,
    PasswordHasher, RevocationError, SessionRevocationStore, TokenStore, TokenStoreError,
    TwoFactorConfirmationRepository, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};
use crate::catalog::application::domain::entities::{
    Category, SubCategory, SubCategoryWithCategory,
};
use crate::catalog::application::ports::outgoing::{
    CatalogRepositoryError, CategoryRepository, SubCategoryRepository,
};
use crate::email::application::ports::outgoing::{AuthEmailError, AuthEmailNotifier, MailKind};

pub const TEST_SESSION_SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

pub fn test_token_provider() -> JwtSessionTokenService {
    let config = SessionConfig::new(
        TEST_SESSION_SECRET.to_string(),
        "Marketplace".to_string(),
        3600,
    )
    .unwrap();
    JwtSessionTokenService::new(config)
}

/// A verified credentials user whose password is `secret123` under [`PlainHasher`].
pub fn sample_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: Some("Jane".to_string()),
        email: email.to_string(),
        password_hash: Some(PlainHasher::digest("secret123")),
        role: UserRole::User,
        email_verified: Some(Utc::now()),
        image: None,
        is_two_factor_enabled: false,
    }
}

// ==================== Users ====================

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    /// Inserts or replaces by id.
    pub fn insert(&self, user: User) {
        self.rows.lock().unwrap().insert(user.id, user);
    }

    pub fn remove(&self, id: Uuid) {
        self.rows.lock().unwrap().remove(&id);
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn all(&self) -> Vec<User> {
        self.rows.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|u| u.email == user.email) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            email_verified: user.email_verified,
            image: user.image,
            is_two_factor_enabled: false,
        };
        rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.password_hash = Some(new_password_hash);
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.email = email.to_string();
        user.email_verified = Some(verified_at);
        Ok(())
    }
}

// ==================== Accounts ====================

#[derive(Default)]
pub struct InMemoryAccounts {
    rows: Mutex<Vec<LinkedAccount>>,
}

impl InMemoryAccounts {
    pub fn insert(&self, user_id: Uuid, provider: &str, provider_account_id: &str) {
        self.rows.lock().unwrap().push(LinkedAccount {
            id: Uuid::new_v4(),
            user_id,
            provider: provider.to_string(),
            provider_account_id: provider_account_id.to_string(),
        });
    }

    pub fn all(&self) -> Vec<LinkedAccount> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn exists_for_user(&self, user_id: Uuid) -> Result<bool, AccountRepositoryError> {
        Ok(self.rows.lock().unwrap().iter().any(|a| a.user_id == user_id))
    }

    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<LinkedAccount>, AccountRepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.provider == provider && a.provider_account_id == provider_account_id)
            .cloned())
    }

    async fn link(
        &self,
        user_id: Uuid,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<LinkedAccount, AccountRepositoryError> {
        self.insert(user_id, provider, provider_account_id);
        self.rows
            .lock()
            .unwrap()
            .last()
            .cloned()
            .ok_or_else(|| AccountRepositoryError::DatabaseError("link lost".to_string()))
    }
}

// ==================== Tokens ====================

#[derive(Default)]
pub struct InMemoryTokens {
    rows: Mutex<Vec<AuthToken>>,
}

impl InMemoryTokens {
    pub fn all(&self, kind: TokenKind) -> Vec<AuthToken> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect()
    }

    /// Stores `token` as is, replacing any token of the same kind for its email.
    pub fn insert(&self, token: AuthToken) {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|t| !(t.kind == token.kind && t.email == token.email));
        rows.push(token);
    }

    /// Seeds a token that expired a minute ago.
    pub fn insert_expired(&self, kind: TokenKind, email: &str) -> AuthToken {
        let token = AuthToken::generate(kind, email, Duration::minutes(-1), Utc::now());
        self.insert(token.clone());
        token
    }
}

#[async_trait]
impl TokenStore for InMemoryTokens {
    async fn issue(
        &self,
        kind: TokenKind,
        email: &str,
        ttl: Duration,
    ) -> Result<AuthToken, TokenStoreError> {
        let token = AuthToken::generate(kind, email, ttl, Utc::now());
        self.insert(token.clone());
        Ok(token)
    }

    async fn find_by_token(
        &self,
        kind: TokenKind,
        token: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.kind == kind && t.token == token)
            .cloned())
    }

    async fn find_by_email(
        &self,
        kind: TokenKind,
        email: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.kind == kind && t.email == email)
            .cloned())
    }

    async fn consume(&self, kind: TokenKind, id: Uuid) -> Result<(), TokenStoreError> {
        self.rows
            .lock()
            .unwrap()
            .retain(|t| !(t.kind == kind && t.id == id));
        Ok(())
    }
}

// ==================== Two-factor confirmations ====================

#[derive(Default)]
pub struct InMemoryConfirmations {
    rows: Mutex<Vec<TwoFactorConfirmation>>,
}

impl InMemoryConfirmations {
    pub fn count_for(&self, user_id: Uuid) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl TwoFactorConfirmationRepository for InMemoryConfirmations {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, ConfirmationRepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<TwoFactorConfirmation, ConfirmationRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|c| c.user_id != user_id);
        let confirmation = TwoFactorConfirmation {
            id: Uuid::new_v4(),
            user_id,
        };
        rows.push(confirmation.clone());
        Ok(confirmation)
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<bool, ConfirmationRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.user_id != user_id);
        Ok(rows.len() < before)
    }
}

// ==================== Revocations ====================

#[derive(Default)]
pub struct InMemoryRevocations {
    revoked: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocations {
    pub fn len(&self) -> usize {
        self.revoked.lock().unwrap().len()
    }

    pub fn revoked_until(&self, session_key: &str) -> Option<DateTime<Utc>> {
        self.revoked.lock().unwrap().get(session_key).copied()
    }
}

#[async_trait]
impl SessionRevocationStore for InMemoryRevocations {
    async fn revoke(
        &self,
        session_key: String,
        _user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError> {
        if expires_at <= Utc::now() {
            return Err(RevocationError::AlreadyExpired);
        }
        self.revoked.lock().unwrap().insert(session_key, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, session_key: &str) -> Result<bool, RevocationError> {
        Ok(self
            .revoked
            .lock()
            .unwrap()
            .get(session_key)
            .is_some_and(|until| *until > Utc::now()))
    }
}

// ==================== Mail ====================

/// Records every message as (kind, email, token).
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(MailKind, String, String)>>,
    fail_next: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(MailKind, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_of(&self, kind: MailKind) -> Vec<(MailKind, String, String)> {
        self.sent().into_iter().filter(|(k, _, _)| *k == kind).collect()
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

#[async_trait]
impl AuthEmailNotifier for RecordingNotifier {
    async fn send(&self, kind: MailKind, email: &str, token: &str) -> Result<(), AuthEmailError> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AuthEmailError::EmailSendingFailed("smtp down".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((kind, email.to_string(), token.to_string()));
        Ok(())
    }
}

// ==================== Hashing ====================

/// Reversible stand-in so tests can read stored hashes.
#[derive(Default)]
pub struct PlainHasher;

impl PlainHasher {
    pub fn digest(password: &str) -> String {
        format!("plain${password}")
    }
}

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(Self::digest(password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(Self::digest(password) == hash)
    }
}

// ==================== Catalog ====================

/// Newest-first listing; ties keep the later insert first.
fn newest_first<T: Clone>(rows: &[T], updated_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut listed: Vec<T> = rows.iter().rev().cloned().collect();
    listed.sort_by_key(|row| std::cmp::Reverse(updated_at(row)));
    listed
}

fn upsert_row<T>(rows: &mut Vec<T>, row: T, same: impl Fn(&T) -> bool) {
    match rows.iter().position(same) {
        Some(i) => rows[i] = row,
        None => rows.push(row),
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCategories {
    rows: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryCategories {
    pub fn insert(&self, category: Category) {
        self.rows.lock().unwrap().push(category);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogRepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id != exclude_id && (c.name == name || c.url == url))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, CatalogRepositoryError> {
        Ok(newest_first(&self.rows.lock().unwrap(), |c| c.updated_at))
    }

    async fn upsert(&self, category: Category) -> Result<Category, CatalogRepositoryError> {
        let id = category.id;
        upsert_row(&mut self.rows.lock().unwrap(), category.clone(), |c| c.id == id);
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Clone, Default)]
pub struct InMemorySubCategories {
    rows: Arc<Mutex<Vec<SubCategory>>>,
    categories: InMemoryCategories,
}

impl InMemorySubCategories {
    pub fn with_categories(categories: InMemoryCategories) -> Self {
        Self {
            rows: Arc::default(),
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn categories(&self) -> InMemoryCategories {
        self.categories.clone()
    }
}

#[async_trait]
impl SubCategoryRepository for InMemorySubCategories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>, CatalogRepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<SubCategory>, CatalogRepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id != exclude_id && (s.name == name || s.url == url))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<SubCategoryWithCategory>, CatalogRepositoryError> {
        let subs = newest_first(&self.rows.lock().unwrap(), |s| s.updated_at);
        let parents = self.categories.rows.lock().unwrap().clone();

        Ok(subs
            .into_iter()
            .map(|sub_category| SubCategoryWithCategory {
                category: parents
                    .iter()
                    .find(|c| c.id == sub_category.category_id)
                    .cloned(),
                sub_category,
            })
            .collect())
    }

    async fn upsert(&self, sub_category: SubCategory) -> Result<SubCategory, CatalogRepositoryError> {
        let id = sub_category.id;
        upsert_row(&mut self.rows.lock().unwrap(), sub_category.clone(), |s| s.id == id);
        Ok(sub_category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() != before)
    }
}
