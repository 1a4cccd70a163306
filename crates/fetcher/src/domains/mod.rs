pub mod normalize;
pub mod walker;

pub use normalize::*;
pub use walker::*;
