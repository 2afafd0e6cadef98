use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{SortDirection, User, UserPatch};

/// Records the directory starts with: (firstName, lastName, email, DOB)
const SEED_USERS: [(&str, &str, &str, (i32, u32, u32)); 3] = [
    ("John", "wick", "johnwick@gamil.com", (1990, 1, 22)),
    ("John", "smith", "johnsmith@gamil.com", (1983, 7, 21)),
    ("Joyal", "white", "joyalwhite@gamil.com", (1989, 3, 21)),
];

/// The fixed records every process starts with.
pub fn seed_users() -> Vec<User> {
    SEED_USERS
        .iter()
        .filter_map(|&(first_name, last_name, email, (year, month, day))| {
            NaiveDate::from_ymd_opt(year, month, day).map(|dob| User {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                dob,
            })
        })
        .collect()
}

/// Repository trait for User persistence
///
/// Emails are compared ASCII-case-insensitively. Uniqueness is the caller's
/// concern: `insert` appends unconditionally.
///
/// Backends that can fail report it as [`UserError::Internal`], which reaches
/// clients as a generic 500. The in-memory store never fails.
///
/// [`UserError::Internal`]: crate::error::UserError::Internal
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, in store order
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Get a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Users whose last name matches, ignoring ASCII case
    async fn filter_by_last_name(&self, last_name: &str) -> UserResult<Vec<User>>;

    /// Append a user
    async fn insert(&self, user: User) -> UserResult<()>;

    /// Merge `patch` into the user with `email`
    async fn update(&self, email: &str, patch: UserPatch) -> UserResult<Option<User>>;

    /// Delete a user by email
    async fn delete(&self, email: &str) -> UserResult<bool>;

    /// Reorder the store by date of birth and return the new order
    async fn sort_by_dob(&self, direction: SortDirection) -> UserResult<Vec<User>>;
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Repository holding the three seed records
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }

    async fn filter_by_last_name(&self, last_name: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let matches = users
            .iter()
            .filter(|u| u.last_name.eq_ignore_ascii_case(last_name))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn insert(&self, user: User) -> UserResult<()> {
        let mut users = self.users.write().await;

        tracing::info!(email = %user.email, "Created user");
        users.push(user);
        Ok(())
    }

    async fn update(&self, email: &str, patch: UserPatch) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.iter_mut().find(|u| u.email.eq_ignore_ascii_case(email)) else {
            return Ok(None);
        };
        user.apply_patch(patch);

        tracing::info!(email = %user.email, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, email: &str) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.iter().position(|u| u.email.eq_ignore_ascii_case(email)) {
            Some(index) => {
                let removed = users.remove(index);
                tracing::info!(email = %removed.email, "Deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn sort_by_dob(&self, direction: SortDirection) -> UserResult<Vec<User>> {
        let mut users = self.users.write().await;

        // slice::sort_by is stable, so equal dates keep their relative order
        // in both directions.
        match direction {
            SortDirection::Asc => users.sort_by(|a, b| a.dob.cmp(&b.dob)),
            SortDirection::Desc => users.sort_by(|a, b| b.dob.cmp(&a.dob)),
        }

        tracing::debug!(%direction, "Sorted users by date of birth");
        Ok(users.clone())
    }
}
