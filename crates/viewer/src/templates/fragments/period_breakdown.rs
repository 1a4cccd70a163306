use maud::{html, Markup};

use super::cell_number;

/// Rainfall at one station for one observation time, every period listed.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBreakdown {
    pub location: String,
    pub date: String,
    pub values: Vec<(String, Option<f64>)>,
}

pub fn period_breakdown_table(
    breakdown: Option<&PeriodBreakdown>,
    location: Option<&str>,
) -> Markup {
    html! {
        @if let Some(breakdown) = breakdown {
            h3 class="title is-6" {
                "Precipitation for " (breakdown.location) " at " (breakdown.date)
            }
            div class="table-container" {
                table id="period-breakdown" class="table is-narrow is-bordered" {
                    thead {
                        tr {
                            th { "Period" }
                            th class="has-text-right" { "Precipitation (mm)" }
                        }
                    }
                    tbody {
                        @for (period, value) in &breakdown.values {
                            tr {
                                td { (period) }
                                td class="has-text-right" { (cell_number(*value)) }
                            }
                        }
                    }
                }
            }
        } @else if let Some(location) = location {
            p class="has-text-grey mb-4" { "No observation times recorded for " (location) "." }
        } @else {
            p class="has-text-grey mb-4" {
                "Select a location to compare its rainfall across periods."
            }
        }
    }
}
