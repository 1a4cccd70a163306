use maud::{html, Markup};

use crate::db::LATEST;

pub struct FilterOptions<'a> {
    /// Route the form submits to
    pub action: &'a str,
    pub locations: &'a [String],
    pub location: Option<&'a str>,
    /// `None` hides the period selector
    pub periods: Option<&'a [String]>,
    pub period: Option<&'a str>,
    /// `None` hides the observation time selector
    pub dates: Option<&'a [String]>,
    /// `None` selects "Latest"
    pub date: Option<&'a str>,
}

pub fn filter_form(options: &FilterOptions) -> Markup {
    html! {
        form method="get" action=(options.action) class="mb-4" {
            div class="field is-grouped is-grouped-multiline" {
                div class="control" {
                    label class="label is-small" for="location" { "Location" }
                    div class="select is-small" {
                        select id="location" name="location" {
                            option value="" selected[options.location.is_none()] { "All" }
                            @for location in options.locations {
                                option value=(location)
                                       selected[options.location == Some(location.as_str())] {
                                    (location)
                                }
                            }
                        }
                    }
                }
                @if let Some(periods) = options.periods {
                    div class="control" {
                        label class="label is-small" for="period" { "Period" }
                        div class="select is-small" {
                            select id="period" name="period" {
                                option value="" selected[options.period.is_none()] { "All" }
                                @for period in periods {
                                    option value=(period)
                                           selected[options.period == Some(period.as_str())] {
                                        (period)
                                    }
                                }
                            }
                        }
                    }
                }
                @if let Some(dates) = options.dates {
                    div class="control" {
                        label class="label is-small" for="date" { "Observation time" }
                        div class="select is-small" {
                            select id="date" name="date" {
                                option value=(LATEST) selected[options.date.is_none()] { "Latest" }
                                @for date in dates {
                                    option value=(date)
                                           selected[options.date == Some(date.as_str())] {
                                        (date)
                                    }
                                }
                            }
                        }
                    }
                }
                div class="control" {
                    label class="label is-small" { "\u{00A0}" }
                    button type="submit" class="button is-small is-link" { "Filter" }
                }
            }
        }
    }
}
