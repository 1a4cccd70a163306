use maud::{html, Markup};

use super::{cell_number, cell_text};
use crate::db::PrecipitationRow;

pub fn precipitation_table(rows: &[PrecipitationRow]) -> Markup {
    html! {
        @if rows.is_empty() {
            div class="has-text-centered has-text-grey py-4" {
                p { "No precipitation rows stored yet." }
            }
        } @else {
            div class="table-container" {
                table class="table is-fullwidth is-striped is-hoverable" {
                    thead {
                        tr {
                            th { "ID" }
                            th { "Location" }
                            th { "Date" }
                            th { "Period" }
                            th class="has-text-right" { "Precipitation (mm)" }
                            th { "Inserted At" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { (row.id) }
                                td { (cell_text(row.location.as_deref())) }
                                td { (cell_text(row.date.as_deref())) }
                                td { (cell_text(row.period.as_deref())) }
                                td class="has-text-right" { (cell_number(row.precipitation)) }
                                td class="is-size-7" { (cell_text(row.inserted_at.as_deref())) }
                            }
                        }
                    }
                }
            }
        }
    }
}
