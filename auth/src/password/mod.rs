pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use argon2::HASH_LEN;
pub use argon2::SALT_LEN;
pub use errors::PasswordError;
