//! User registry and session repository.
//!
//! # Responsibility
//! - Register users against the stored user list (`@users`).
//! - Authenticate email/password pairs and own the session record (`@user`).
//! - Reset session and collection data on logout.
//!
//! # Invariants
//! - Emails are unique within `@users` (exact, case-sensitive match).
//! - The session record is only written by a successful registration or
//!   authentication.
//! - `end_session` keeps `@users` intact.

use super::kv_repo::{
    KvRepository, RepoError, RepoResult, CURRENT_USER_KEY, NOTES_KEY, TASKS_KEY, USERS_KEY,
};
use crate::model::user::User;
use crate::storage::KeyValueStore;
use log::{info, warn};

/// Repository interface for registration, authentication and session.
pub trait AuthRepository {
    /// Appends `candidate` to the user list and starts a session for it.
    fn register_user(&self, candidate: &User) -> RepoResult<()>;
    /// Returns the first user matching both email and password and starts a
    /// session for it.
    fn authenticate(&self, email: &str, password: &str) -> RepoResult<User>;
    /// Returns the session record, if any.
    fn current_session(&self) -> Option<User>;
    /// Removes the session record together with tasks and notes in one batch.
    ///
    /// Returns `false` when the storage batch failed.
    fn end_session(&self) -> bool;
    /// Returns the registered user list in registration order.
    fn list_users(&self) -> Vec<User>;
}

impl<S: KeyValueStore> AuthRepository for KvRepository<S> {
    fn register_user(&self, candidate: &User) -> RepoResult<()> {
        candidate.validate()?;

        let _users = self.lock_users();
        let mut users: Vec<User> = self.storage.get(USERS_KEY).unwrap_or_default();
        if users.iter().any(|user| user.email == candidate.email) {
            warn!("event=user_register module=repo status=rejected reason=duplicate_email");
            return Err(RepoError::DuplicateUser(candidate.email.clone()));
        }

        users.push(candidate.clone());
        self.storage.put(USERS_KEY, &users);
        self.storage.put(CURRENT_USER_KEY, candidate);
        info!(
            "event=user_register module=repo status=ok user_count={}",
            users.len()
        );
        Ok(())
    }

    fn authenticate(&self, email: &str, password: &str) -> RepoResult<User> {
        let _users = self.lock_users();
        let users: Vec<User> = self.storage.get(USERS_KEY).unwrap_or_default();
        let Some(matched) = users
            .into_iter()
            .find(|user| user.matches_credentials(email, password))
        else {
            warn!("event=user_login module=repo status=rejected reason=invalid_credentials");
            return Err(RepoError::InvalidCredentials);
        };

        self.storage.put(CURRENT_USER_KEY, &matched);
        info!("event=user_login module=repo status=ok");
        Ok(matched)
    }

    fn current_session(&self) -> Option<User> {
        let _users = self.lock_users();
        self.storage.get(CURRENT_USER_KEY)
    }

    fn end_session(&self) -> bool {
        let _users = self.lock_users();
        let _tasks = self.lock_tasks();
        let _notes = self.lock_notes();
        let cleared = self
            .storage
            .remove_many(&[CURRENT_USER_KEY, TASKS_KEY, NOTES_KEY]);
        info!(
            "event=user_logout module=repo status={}",
            if cleared { "ok" } else { "error" }
        );
        cleared
    }

    fn list_users(&self) -> Vec<User> {
        let _users = self.lock_users();
        self.storage.get(USERS_KEY).unwrap_or_default()
    }
}

impl<R: AuthRepository + ?Sized> AuthRepository for &R {
    fn register_user(&self, candidate: &User) -> RepoResult<()> {
        (**self).register_user(candidate)
    }

    fn authenticate(&self, email: &str, password: &str) -> RepoResult<User> {
        (**self).authenticate(email, password)
    }

    fn current_session(&self) -> Option<User> {
        (**self).current_session()
    }

    fn end_session(&self) -> bool {
        (**self).end_session()
    }

    fn list_users(&self) -> Vec<User> {
        (**self).list_users()
    }
}
