use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, SortDirection, UpdateUser, User};
use crate::repository::UserRepository;
use crate::validation::{validate_new_user, validate_patch};

pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
pub const INVALID_SORT_DIRECTION: &str = "Invalid sort order. Use \"asc\" or \"desc\".";

/// Service layer for User business logic
///
/// Composite writes (check-then-insert, find-then-merge) hold `write_gate`
/// for their whole duration, so two requests can never interleave them.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    write_gate: Arc<Mutex<()>>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// List all users in store order
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Get a user by email
    pub async fn get_user(&self, email: &str) -> UserResult<User> {
        if !email.contains('@') {
            return Err(UserError::Validation(INVALID_EMAIL_FORMAT.to_string()));
        }

        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    /// Validate and add a new user; the email must not be taken
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let user = validate_new_user(input)?;

        let _gate = self.write_gate.lock().await;
        if self.repository.find_by_email(&user.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(user.email));
        }

        self.repository.insert(user.clone()).await?;
        Ok(user)
    }

    /// Validate and merge changes into the user with `email`
    pub async fn update_user(&self, email: &str, input: UpdateUser) -> UserResult<User> {
        let patch = validate_patch(email, input)?;

        let _gate = self.write_gate.lock().await;
        self.repository
            .update(email, patch)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    /// Delete a user
    pub async fn delete_user(&self, email: &str) -> UserResult<()> {
        let _gate = self.write_gate.lock().await;
        let deleted = self.repository.delete(email).await?;

        if !deleted {
            return Err(UserError::NotFound(email.to_string()));
        }

        Ok(())
    }

    /// Users with the given last name; at least one must match
    pub async fn users_by_last_name(&self, last_name: &str) -> UserResult<Vec<User>> {
        let matches = self.repository.filter_by_last_name(last_name).await?;

        if matches.is_empty() {
            return Err(UserError::NoMatches(last_name.to_string()));
        }

        Ok(matches)
    }

    /// Reorder the directory by date of birth (`asc` or `desc`)
    pub async fn sort_users(&self, direction: &str) -> UserResult<Vec<User>> {
        let direction: SortDirection = direction
            .parse()
            .map_err(|_| UserError::Validation(INVALID_SORT_DIRECTION.to_string()))?;

        let _gate = self.write_gate.lock().await;
        self.repository.sort_by_dob(direction).await
    }
}
