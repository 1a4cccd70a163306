mod response_shape;
mod walk_response;

pub use response_shape::*;
pub use walk_response::*;
