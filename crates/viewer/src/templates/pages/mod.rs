mod precipitation;
mod weather;

pub use precipitation::{precipitation_content, precipitation_page, PrecipitationPageData};
pub use weather::{weather_content, weather_page, WeatherPageData};
