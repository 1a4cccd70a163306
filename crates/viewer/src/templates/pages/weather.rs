use maud::{html, Markup};

use crate::{
    db::WeatherRow,
    templates::{
        fragments::{filter_form, notice, weather_table, FilterOptions},
        layouts::{base, CurrentPage, PageConfig},
    },
};

#[derive(Debug, Default)]
pub struct WeatherPageData {
    pub rows: Vec<WeatherRow>,
    pub locations: Vec<String>,
    pub location: Option<String>,
    /// Set when the store could not be read; replaces the table
    pub error: Option<String>,
}

pub fn weather_page(data: &WeatherPageData) -> Markup {
    let config = PageConfig {
        title: "Weather Data Viewer - Weather",
        current_page: CurrentPage::Weather,
    };

    base(&config, weather_content(data))
}

pub fn weather_content(data: &WeatherPageData) -> Markup {
    html! {
        div class="box" {
            div class="is-flex is-justify-content-space-between is-align-items-center mb-4" {
                h2 class="title is-5 mb-0" { "Weather Observations" }
                span class="tag is-info is-light" { "Rows: " (data.rows.len()) }
            }

            (filter_form(&FilterOptions {
                action: "/",
                locations: &data.locations,
                location: data.location.as_deref(),
                periods: None,
                period: None,
                dates: None,
                date: None,
            }))

            @if let Some(message) = &data.error {
                (notice(message))
            } @else {
                (weather_table(&data.rows))
            }
        }
    }
}
