pub mod config;
pub mod db;
pub mod repositories;

pub use config::*;
pub use db::*;
pub use repositories::*;
