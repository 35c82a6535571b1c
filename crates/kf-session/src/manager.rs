//! The session/token lifecycle manager.

use std::sync::Arc;

use kf_crypto::PasswordHasherService;
use kf_index::ActiveTokenIndex;
use kf_model::{NewCredential, TokenPair};
use kf_storage::{CredentialStore, RefreshTokenStore};
use kf_token::{decode_unverified, Claims, TokenError, TokenPurpose, TokenSigner};
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};
use crate::header::extract_token;

/// Orchestrates the credential store, password hasher, token signer, and
/// active-token index into the signup/login/refresh/change-password/
/// logout/validate operations.
///
/// All collaborators are injected; the manager holds no connection state
/// of its own and no shared in-process mutable state. Concurrent
/// operations for the same user coordinate only through the stores.
pub struct SessionManager {
    credentials: Arc<dyn CredentialStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    index: Arc<dyn ActiveTokenIndex>,
    hasher: PasswordHasherService,
    signer: TokenSigner,
}

impl SessionManager {
    /// Creates a session manager around the given collaborators.
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        index: Arc<dyn ActiveTokenIndex>,
        hasher: PasswordHasherService,
        signer: TokenSigner,
    ) -> Self {
        Self {
            credentials,
            refresh_tokens,
            index,
            hasher,
            signer,
        }
    }

    /// Returns the token signer.
    #[must_use]
    pub const fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Registers a new account and opens its first session.
    ///
    /// The store's unique constraint on username is the duplicate check;
    /// there is no read-then-write race. A failure after the credential
    /// insert leaves a usable account with no session; the client
    /// recovers by retrying with login, no rollback is attempted.
    ///
    /// # Errors
    ///
    /// `DuplicateUsername` when the username is taken, otherwise the
    /// failing step's error.
    pub async fn signup(&self, username: &str, password: &str) -> SessionResult<TokenPair> {
        let salt = self.hasher.generate_salt()?;
        let hash = self.hasher.hash(password, &salt)?;

        let user_id = self
            .credentials
            .create(&NewCredential::new(username, salt, hash))
            .await?;

        tracing::info!(%user_id, "account created");

        self.open_session(user_id).await
    }

    /// Verifies a username/password pair and opens a new session.
    ///
    /// Multiple concurrent logins for the same user are supported; each
    /// produces an independent token pair appended to the same index set.
    /// That is the multi-device session model.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown username, `InvalidCredentials` on
    /// a password mismatch (the index is not touched in either case).
    pub async fn login(&self, username: &str, password: &str) -> SessionResult<TokenPair> {
        let credential = self.credentials.get_by_username(username).await?;

        if !self
            .hasher
            .verify(password, &credential.salt, &credential.password_hash)?
        {
            return Err(SessionError::InvalidCredentials);
        }

        self.open_session(credential.id).await
    }

    /// Redeems a refresh token for a new access token.
    ///
    /// The refresh token is single-use: its record is deleted when it is
    /// presented, whether or not verification succeeds. A token that
    /// fails verification is therefore burned as well, which prevents
    /// replay. No new refresh token is issued; once the refresh token
    /// itself expires the client must re-authenticate.
    ///
    /// # Errors
    ///
    /// `RefreshTokenNotFound` when the token is unknown or was
    /// concurrently redeemed; `TokenExpired`/`TokenMalformed`/
    /// `TokenInvalid` from verification.
    pub async fn refresh_access_token(&self, presented: &str) -> SessionResult<String> {
        let stored = self
            .refresh_tokens
            .find(presented)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)?;

        let outcome = self.signer.verify(&stored, TokenPurpose::Refresh);

        // Consumed regardless of the verification outcome.
        let deleted = self.refresh_tokens.delete(&stored).await?;
        if !deleted {
            // Another request redeemed it between our find and delete.
            return Err(SessionError::RefreshTokenNotFound);
        }

        let claims = outcome?;

        self.issue_access_token(claims.sub).await
    }

    /// Changes the password and revokes every live access token.
    ///
    /// Other sessions are forced to re-authenticate, but outstanding
    /// refresh tokens are left untouched: a device holding one can still
    /// mint a fresh access token without the new password.
    ///
    /// Returns one fresh access token for the caller's current session.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown id, `IncorrectPassword` when the
    /// old password does not match.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> SessionResult<String> {
        let credential = self.credentials.get_by_id(user_id).await?;

        if !self
            .hasher
            .verify(old_password, &credential.salt, &credential.password_hash)?
        {
            return Err(SessionError::IncorrectPassword);
        }

        let salt = self.hasher.generate_salt()?;
        let hash = self.hasher.hash(new_password, &salt)?;
        self.credentials
            .update_password(user_id, &hash, &salt)
            .await?;

        self.index.remove_all(user_id).await?;
        tracing::info!(%user_id, "password changed, active tokens revoked");

        self.issue_access_token(user_id).await
    }

    /// Removes one access token from the user's live set.
    ///
    /// Idempotent: logging out a token that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the index transport is down.
    pub async fn logout(&self, user_id: Uuid, access_token: &str) -> SessionResult<()> {
        self.index.remove_child(user_id, access_token).await?;
        Ok(())
    }

    /// Validates a scheme-prefixed authorization header value and returns
    /// the claims to attach to the request context.
    ///
    /// The success path checks signature and expiry only; index
    /// membership is deliberately not consulted, so a logged-out but
    /// unexpired token is still accepted until it expires naturally.
    /// Checking membership here would buy immediate revocation at the
    /// cost of an index round-trip per request.
    ///
    /// On an expired or malformed token the claims are best-effort
    /// decoded anyway so the dead token can be removed from its user's
    /// index entry; a cleanup failure is logged, not surfaced.
    ///
    /// # Errors
    ///
    /// `TokenExpired`/`TokenMalformed`/`TokenInvalid` per the
    /// verification outcome.
    pub async fn validate_access_token(&self, header_value: &str) -> SessionResult<Claims> {
        let token = extract_token(header_value)?;

        match self.signer.verify(token, TokenPurpose::Access) {
            Ok(claims) => Ok(claims),
            Err(err @ (TokenError::Expired | TokenError::Malformed)) => {
                if let Ok(claims) = decode_unverified(token) {
                    if let Err(cleanup_err) = self.index.remove_child(claims.sub, token).await {
                        tracing::warn!(
                            user_id = %claims.sub,
                            error = %cleanup_err,
                            "failed to remove dead access token from index"
                        );
                    }
                }
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Issues the refresh/access pair for a freshly authenticated user.
    async fn open_session(&self, user_id: Uuid) -> SessionResult<TokenPair> {
        let refresh_token = self.signer.issue(user_id, TokenPurpose::Refresh)?;
        self.refresh_tokens.save(&refresh_token).await?;

        let access_token = self.issue_access_token(user_id).await?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Signs a new access token and registers it as live.
    async fn issue_access_token(&self, user_id: Uuid) -> SessionResult<String> {
        let token = self.signer.issue(user_id, TokenPurpose::Access)?;
        self.index.add_child(user_id, &token).await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use kf_crypto::PasswordPolicy;
    use kf_index::IndexResult;
    use kf_model::Credential;
    use kf_storage::{StorageError, StorageResult};
    use kf_token::{Claims, TokenConfig};
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryCredentialStore {
        records: Mutex<Vec<Credential>>,
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn create(&self, credential: &NewCredential) -> StorageResult<Uuid> {
            let mut records = self.records.lock();
            if records.iter().any(|r| r.username == credential.username) {
                return Err(StorageError::duplicate(
                    "Credential",
                    "username",
                    &credential.username,
                ));
            }
            let record = credential.clone().into_credential();
            let id = record.id;
            records.push(record);
            Ok(id)
        }

        async fn get_by_username(&self, username: &str) -> StorageResult<Credential> {
            self.records
                .lock()
                .iter()
                .find(|r| r.username == username)
                .cloned()
                .ok_or(StorageError::not_found("Credential"))
        }

        async fn get_by_id(&self, id: Uuid) -> StorageResult<Credential> {
            self.records
                .lock()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or(StorageError::not_found("Credential"))
        }

        async fn update_password(
            &self,
            id: Uuid,
            new_hash: &str,
            new_salt: &str,
        ) -> StorageResult<()> {
            let mut records = self.records.lock();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StorageError::not_found("Credential"))?;
            record.password_hash = new_hash.to_string();
            record.salt = new_salt.to_string();
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryRefreshTokenStore {
        tokens: Mutex<HashSet<String>>,
        fail_saves: AtomicBool,
    }

    impl MemoryRefreshTokenStore {
        fn contains(&self, token: &str) -> bool {
            self.tokens.lock().contains(token)
        }
    }

    #[async_trait]
    impl RefreshTokenStore for MemoryRefreshTokenStore {
        async fn save(&self, token: &str) -> StorageResult<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("injected failure".to_string()));
            }
            self.tokens.lock().insert(token.to_string());
            Ok(())
        }

        async fn find(&self, token: &str) -> StorageResult<Option<String>> {
            Ok(self.contains(token).then(|| token.to_string()))
        }

        async fn delete(&self, token: &str) -> StorageResult<bool> {
            Ok(self.tokens.lock().remove(token))
        }
    }

    #[derive(Default)]
    struct MemoryTokenIndex {
        sets: Mutex<HashMap<Uuid, HashSet<String>>>,
    }

    impl MemoryTokenIndex {
        fn tokens_for(&self, user_id: Uuid) -> HashSet<String> {
            self.sets.lock().get(&user_id).cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl ActiveTokenIndex for MemoryTokenIndex {
        async fn get(&self, user_id: Uuid) -> IndexResult<Vec<String>> {
            Ok(self.tokens_for(user_id).into_iter().collect())
        }

        async fn add_child(&self, user_id: Uuid, token: &str) -> IndexResult<()> {
            self.sets
                .lock()
                .entry(user_id)
                .or_default()
                .insert(token.to_string());
            Ok(())
        }

        async fn remove_child(&self, user_id: Uuid, token: &str) -> IndexResult<()> {
            if let Some(set) = self.sets.lock().get_mut(&user_id) {
                set.remove(token);
            }
            Ok(())
        }

        async fn remove_all(&self, user_id: Uuid) -> IndexResult<()> {
            self.sets.lock().remove(&user_id);
            Ok(())
        }
    }

    struct Fixture {
        manager: SessionManager,
        refresh_store: Arc<MemoryRefreshTokenStore>,
        index: Arc<MemoryTokenIndex>,
    }

    fn fixture() -> Fixture {
        let credentials = Arc::new(MemoryCredentialStore::default());
        let refresh_store = Arc::new(MemoryRefreshTokenStore::default());
        let index = Arc::new(MemoryTokenIndex::default());

        // Low-cost hashing keeps the suite quick.
        let hasher = PasswordHasherService::new(
            PasswordPolicy::new()
                .memory_cost(8 * 1024)
                .time_cost(1)
                .parallelism(1),
        );
        let signer = TokenSigner::new(b"test-secret", TokenConfig::default());

        let manager = SessionManager::new(
            credentials,
            refresh_store.clone(),
            index.clone(),
            hasher,
            signer,
        );

        Fixture {
            manager,
            refresh_store,
            index,
        }
    }

    fn subject_of(fix: &Fixture, token: &str) -> Uuid {
        fix.manager
            .signer()
            .verify(token, TokenPurpose::Access)
            .unwrap()
            .sub
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() {
        let fix = fixture();

        let signup_pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let login_pair = fix.manager.login("alice", "p@ss1").await.unwrap();

        let user = subject_of(&fix, &signup_pair.access_token);
        assert_eq!(user, subject_of(&fix, &login_pair.access_token));

        // Both sessions' access tokens are live.
        let live = fix.index.tokens_for(user);
        assert!(live.contains(&signup_pair.access_token));
        assert!(live.contains(&login_pair.access_token));

        // Both refresh tokens are outstanding.
        assert!(fix.refresh_store.contains(&signup_pair.refresh_token));
        assert!(fix.refresh_store.contains(&login_pair.refresh_token));
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let fix = fixture();

        fix.manager.signup("alice", "p@ss1").await.unwrap();
        let err = fix.manager.signup("alice", "other").await.unwrap_err();
        assert!(matches!(err, SessionError::DuplicateUsername(v) if v == "alice"));
    }

    #[tokio::test]
    async fn login_unknown_user_is_account_not_found() {
        let fix = fixture();

        let err = fix.manager.login("nobody", "p@ss1").await.unwrap_err();
        assert!(matches!(err, SessionError::AccountNotFound));
    }

    #[tokio::test]
    async fn wrong_password_never_mutates_the_index() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);
        let before = fix.index.tokens_for(user);

        let err = fix.manager.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));

        assert_eq!(fix.index.tokens_for(user), before);
    }

    #[tokio::test]
    async fn refresh_token_is_single_use() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        let new_access = fix
            .manager
            .refresh_access_token(&pair.refresh_token)
            .await
            .unwrap();
        assert_ne!(new_access, pair.access_token);
        assert!(fix.index.tokens_for(user).contains(&new_access));

        // Second presentation of the same refresh token fails.
        let err = fix
            .manager
            .refresh_access_token(&pair.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::RefreshTokenNotFound));
    }

    #[tokio::test]
    async fn expired_refresh_token_is_burned_on_presentation() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        // Plant an already-expired refresh token for the user.
        let claims = Claims::new(user, TokenPurpose::Refresh, -60);
        let expired = fix.manager.signer().sign(&claims).unwrap();
        fix.refresh_store.save(&expired).await.unwrap();

        let err = fix.manager.refresh_access_token(&expired).await.unwrap_err();
        assert!(matches!(err, SessionError::TokenExpired));

        // Deleted despite the failure: the second attempt no longer finds it.
        assert!(!fix.refresh_store.contains(&expired));
        let err = fix.manager.refresh_access_token(&expired).await.unwrap_err();
        assert!(matches!(err, SessionError::RefreshTokenNotFound));
    }

    #[tokio::test]
    async fn change_password_rotates_credentials_and_revokes_access() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "old-pass").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        let new_access = fix
            .manager
            .change_password(user, "old-pass", "new-pass")
            .await
            .unwrap();

        // Old access tokens are revoked; only the fresh one survives.
        let live = fix.index.tokens_for(user);
        assert!(!live.contains(&pair.access_token));
        assert_eq!(live.len(), 1);
        assert!(live.contains(&new_access));

        // Refresh tokens are deliberately left outstanding.
        assert!(fix.refresh_store.contains(&pair.refresh_token));

        // Old password no longer works, new one does.
        let err = fix.manager.login("alice", "old-pass").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));
        fix.manager.login("alice", "new-pass").await.unwrap();
    }

    #[tokio::test]
    async fn change_password_with_wrong_old_password_fails() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        let err = fix
            .manager
            .change_password(user, "wrong", "new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::IncorrectPassword));

        // Nothing was revoked.
        assert!(fix.index.tokens_for(user).contains(&pair.access_token));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        fix.manager.logout(user, &pair.access_token).await.unwrap();
        assert!(!fix.index.tokens_for(user).contains(&pair.access_token));

        // Logging out the same token again is a no-op, not an error.
        fix.manager.logout(user, &pair.access_token).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_logins_both_land_in_the_index() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        let (a, b) = tokio::join!(
            fix.manager.login("alice", "p@ss1"),
            fix.manager.login("alice", "p@ss1"),
        );
        let a = a.unwrap();
        let b = b.unwrap();

        assert_ne!(a.access_token, b.access_token);

        let live = fix.index.tokens_for(user);
        assert!(live.contains(&a.access_token));
        assert!(live.contains(&b.access_token));
    }

    #[tokio::test]
    async fn validate_accepts_live_token_and_attaches_claims() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        let header = format!("Bearer {}", pair.access_token);
        let claims = fix.manager.validate_access_token(&header).await.unwrap();
        assert_eq!(claims.sub, user);
    }

    #[tokio::test]
    async fn validate_does_not_consult_the_index() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        // Logged out, but still signature-valid and unexpired: accepted
        // until natural expiry. Eventual revocation by design.
        fix.manager.logout(user, &pair.access_token).await.unwrap();

        let header = format!("Bearer {}", pair.access_token);
        fix.manager.validate_access_token(&header).await.unwrap();
    }

    #[tokio::test]
    async fn validate_cleans_up_expired_tokens() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let user = subject_of(&fix, &pair.access_token);

        // Plant an expired token in the user's live set.
        let claims = Claims::new(user, TokenPurpose::Access, -60);
        let expired = fix.manager.signer().sign(&claims).unwrap();
        fix.index.add_child(user, &expired).await.unwrap();

        let header = format!("Bearer {expired}");
        let err = fix.manager.validate_access_token(&header).await.unwrap_err();
        assert!(matches!(err, SessionError::TokenExpired));

        // The dead token was removed from the index as a side effect.
        assert!(!fix.index.tokens_for(user).contains(&expired));
        assert!(fix.index.tokens_for(user).contains(&pair.access_token));
    }

    #[tokio::test]
    async fn validate_rejects_garbage_headers() {
        let fix = fixture();

        let err = fix
            .manager
            .validate_access_token("Bearer not-a-token")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::TokenMalformed));

        let err = fix.manager.validate_access_token("").await.unwrap_err();
        assert!(matches!(err, SessionError::TokenMalformed));
    }

    #[tokio::test]
    async fn validate_rejects_refresh_tokens_as_invalid() {
        let fix = fixture();

        let pair = fix.manager.signup("alice", "p@ss1").await.unwrap();
        let header = format!("Bearer {}", pair.refresh_token);

        let err = fix.manager.validate_access_token(&header).await.unwrap_err();
        assert!(matches!(err, SessionError::TokenInvalid));
    }

    #[tokio::test]
    async fn failed_signup_leaves_a_usable_account() {
        let fix = fixture();

        // The refresh-token persist step fails mid-signup.
        fix.refresh_store.fail_saves.store(true, Ordering::SeqCst);
        let err = fix.manager.signup("alice", "p@ss1").await.unwrap_err();
        assert!(matches!(err, SessionError::StorageUnavailable(_)));

        // No rollback: the credential exists and a retry via login works.
        fix.refresh_store.fail_saves.store(false, Ordering::SeqCst);
        let err = fix.manager.signup("alice", "p@ss1").await.unwrap_err();
        assert!(matches!(err, SessionError::DuplicateUsername(_)));
        fix.manager.login("alice", "p@ss1").await.unwrap();
    }
}
