pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{
    filter_form, notice, period_breakdown_table, precipitation_table, weather_table, FilterOptions,
    PeriodBreakdown,
};
pub use layouts::{CurrentPage, PageConfig};
pub use pages::{precipitation_page, weather_page, PrecipitationPageData, WeatherPageData};
