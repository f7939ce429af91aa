pub mod auth;
pub mod user;

pub use auth::PostgresAuthRepository;
pub use user::PostgresUserRepository;
