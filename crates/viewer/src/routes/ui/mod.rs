mod precipitation;
mod weather;

pub use precipitation::precipitation_handler;
pub use weather::weather_handler;
