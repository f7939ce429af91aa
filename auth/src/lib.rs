//! Credential primitives library
//!
//! Provides the cryptographic building blocks for credential verification:
//! - Salted password hashing with fixed Argon2id parameters
//! - Cryptographically secure salt and random-hex generation
//! - HS256 JWT encoding and validation
//!
//! Everything here is pure computation: no storage, no HTTP, no sessions.
//! Services own the policy (what to hash, what a subject means); this crate
//! owns the mechanics.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::password::PasswordHasher;
//! use auth::random;
//!
//! let hasher = PasswordHasher::new();
//! let salt = random::generate_salt().unwrap();
//! let digest = hasher.hash("my_password", &salt).unwrap();
//! assert!(hasher.verify("my_password", &salt, &digest).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new()
//!     .with_subject("user123")
//!     .with_expiration(4102444800); // far future
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```

pub mod jwt;
pub mod password;
pub mod random;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use random::RandomError;
