mod filter_form;
mod notice;
mod period_breakdown;
mod precipitation_table;
mod weather_table;

pub use filter_form::{filter_form, FilterOptions};
pub use notice::notice;
pub use period_breakdown::{period_breakdown_table, PeriodBreakdown};
pub use precipitation_table::precipitation_table;
pub use weather_table::weather_table;

use maud::{html, Markup};

/// Placeholder for NULL columns.
pub(crate) fn cell_text(value: Option<&str>) -> Markup {
    html! {
        @if let Some(text) = value {
            (text)
        } @else {
            span class="has-text-grey" { "-" }
        }
    }
}

pub(crate) fn cell_number(value: Option<f64>) -> Markup {
    html! {
        @if let Some(number) = value {
            (number)
        } @else {
            span class="has-text-grey" { "-" }
        }
    }
}
