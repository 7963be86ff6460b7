pub mod context;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use context::AuthContext;
pub use extractors::ClientIp;
