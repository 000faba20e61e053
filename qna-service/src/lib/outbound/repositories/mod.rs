pub mod refresh_session;
pub mod user;

pub use refresh_session::PostgresRefreshSessionRepository;
pub use test::PostgresTestRepository;
pub use user::PostgresUserRepository;
