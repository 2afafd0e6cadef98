//! Users Domain
//!
//! An in-memory user directory behind a session login.
//!
//! # Features
//!
//! - User CRUD keyed by email
//! - Filter by last name, sort by date of birth
//! - Field validation with single, ordered error messages
//! - Login that binds a signed token to the caller's session
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (+ login)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, write serialization
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     auth_handlers, handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-signing-secret-of-at-least-32-chars"));
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::seeded();
//! let service = UserService::new(repository);
//!
//! // Create Axum routers; wrap the final app in the session layer
//! let router = axum::Router::new()
//!     .nest("/user", handlers::router(service, auth.clone()))
//!     .merge(auth_handlers::router(auth));
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use auth_handlers::{AuthError, FieldError, LoginRequest};
pub use error::{UserError, UserResult};
pub use models::{CreateUser, SortDirection, UpdateUser, User, UserPatch};
pub use repository::{InMemoryUserRepository, UserRepository, seed_users};
pub use service::UserService;
