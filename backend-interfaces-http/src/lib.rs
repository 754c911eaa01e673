pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::*;
pub use extractors::*;
pub use handlers::*;
pub use routes::*;
