use maud::{html, Markup};

use super::{cell_number, cell_text};
use crate::db::WeatherRow;

pub fn weather_table(rows: &[WeatherRow]) -> Markup {
    html! {
        @if rows.is_empty() {
            div class="has-text-centered has-text-grey py-4" {
                p { "No weather rows stored yet." }
            }
        } @else {
            div class="table-container" {
                table class="table is-fullwidth is-striped is-hoverable" {
                    thead {
                        tr {
                            th { "ID" }
                            th { "Location" }
                            th { "Date" }
                            th class="has-text-right" { "Min Temp" }
                            th class="has-text-right" { "Max Temp" }
                            th { "Description" }
                            th { "Inserted At" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { (row.id) }
                                td { (cell_text(row.location.as_deref())) }
                                td { (cell_text(row.date.as_deref())) }
                                td class="has-text-right" { (cell_number(row.min_temp)) }
                                td class="has-text-right" { (cell_number(row.max_temp)) }
                                td { (cell_text(row.description.as_deref())) }
                                td class="is-size-7" { (cell_text(row.inserted_at.as_deref())) }
                            }
                        }
                    }
                }
            }
        }
    }
}
