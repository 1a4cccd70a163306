mod periods;
mod weather_store;

pub use periods::*;
pub use weather_store::*;
