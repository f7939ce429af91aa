pub mod postgres;

pub use postgres::PostgresSessionStore;
