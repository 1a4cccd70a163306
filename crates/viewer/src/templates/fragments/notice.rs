use maud::{html, Markup};

/// Warning box shown in place of a table when the store cannot be read.
pub fn notice(message: &str) -> Markup {
    html! {
        div class="notification is-warning is-light" {
            p { (message) }
        }
    }
}
