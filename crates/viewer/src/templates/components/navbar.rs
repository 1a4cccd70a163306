use maud::{html, Markup};

use crate::templates::layouts::CurrentPage;

pub fn navbar(current_page: CurrentPage) -> Markup {
    html! {
        div class="tabs is-boxed mb-4" {
            ul {
                li class=(tab_class(current_page, CurrentPage::Weather)) {
                    a href="/" {
                        span class="icon is-small" { (thermometer_icon()) }
                        span { "Weather" }
                    }
                }
                li class=(tab_class(current_page, CurrentPage::Precipitation)) {
                    a href="/precipitation" {
                        span class="icon is-small" { (rain_icon()) }
                        span { "Precipitation" }
                    }
                }
            }
        }
    }
}

fn tab_class(current: CurrentPage, page: CurrentPage) -> &'static str {
    if current == page {
        "is-active"
    } else {
        ""
    }
}

fn thermometer_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M14 14.76V3.5a2.5 2.5 0 0 0-5 0v11.26a4.5 4.5 0 1 0 5 0z" {}
        }
    }
}

fn rain_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            line x1="8" y1="19" x2="8" y2="21" {}
            line x1="8" y1="13" x2="8" y2="15" {}
            line x1="16" y1="19" x2="16" y2="21" {}
            line x1="16" y1="13" x2="16" y2="15" {}
            line x1="12" y1="21" x2="12" y2="23" {}
            line x1="12" y1="15" x2="12" y2="17" {}
            path d="M20 16.58A5 5 0 0 0 18 7h-1.26A8 8 0 1 0 4 15.25" {}
        }
    }
}
