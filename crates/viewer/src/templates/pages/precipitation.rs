use maud::{html, Markup};

use crate::{
    db::PrecipitationRow,
    templates::{
        fragments::{
            filter_form, notice, period_breakdown_table, precipitation_table, FilterOptions,
            PeriodBreakdown,
        },
        layouts::{base, CurrentPage, PageConfig},
    },
};

#[derive(Debug, Default)]
pub struct PrecipitationPageData {
    /// Readings over time for the location and period filters
    pub rows: Vec<PrecipitationRow>,
    pub locations: Vec<String>,
    pub location: Option<String>,
    /// Already in display order
    pub periods: Vec<String>,
    pub period: Option<String>,
    /// Observation times, newest first
    pub dates: Vec<String>,
    /// Explicitly chosen observation time; `None` means latest
    pub date: Option<String>,
    pub breakdown: Option<PeriodBreakdown>,
    pub error: Option<String>,
}

pub fn precipitation_page(data: &PrecipitationPageData) -> Markup {
    let config = PageConfig {
        title: "Weather Data Viewer - Precipitation",
        current_page: CurrentPage::Precipitation,
    };

    base(&config, precipitation_content(data))
}

pub fn precipitation_content(data: &PrecipitationPageData) -> Markup {
    html! {
        div class="box" {
            div class="is-flex is-justify-content-space-between is-align-items-center mb-4" {
                h2 class="title is-5 mb-0" { "Rainfall Readings" }
                span class="tag is-info is-light" { "Rows: " (data.rows.len()) }
            }

            (filter_form(&FilterOptions {
                action: "/precipitation",
                locations: &data.locations,
                location: data.location.as_deref(),
                periods: Some(&data.periods),
                period: data.period.as_deref(),
                dates: Some(&data.dates),
                date: data.date.as_deref(),
            }))

            @if let Some(message) = &data.error {
                (notice(message))
            } @else {
                (period_breakdown_table(data.breakdown.as_ref(), data.location.as_deref()))
                h3 class="title is-6" { "Readings over time" }
                (precipitation_table(&data.rows))
            }
        }
    }
}
