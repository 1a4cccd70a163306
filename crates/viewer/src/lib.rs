pub mod db;
mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
