pub mod connection_pool;
pub mod sqlite_repository;
pub mod unit_of_work;

pub use connection_pool::ConnectionPool;
pub use sqlite_repository::SqliteRepository;
