mod database;
mod hashing;
mod jwt;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::{ACCESS_TOKEN, Claims, JwtConfig};
