pub mod pool;
pub mod statements;

pub use pool::*;
pub use statements::*;
