mod domains;
mod error;
mod pipeline;
mod store;
mod utils;

pub use domains::*;
pub use error::*;
pub use pipeline::*;
pub use store::*;
pub use utils::*;
