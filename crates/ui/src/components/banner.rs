//! Status banners and badges

use complyform_core::{Icon, Tone};
use dioxus::prelude::*;

/// Error and success banners of a page
///
/// The error banner stays until the next successful load or mutation; the
/// notice banner is cleared by its timer.
#[component]
pub fn Banner(error: Option<String>, notice: Option<String>) -> Element {
    rsx! {
        if let Some(error) = error {
            div {
                class: "banner banner-error",
                role: "alert",
                span { class: "mr-2", "{Icon::Alert.glyph()}" }
                "{error}"
            }
        }
        if let Some(notice) = notice {
            div {
                class: "banner banner-success",
                role: "status",
                "{notice}"
            }
        }
    }
}

/// Pill-shaped label in one tone
#[component]
pub fn Badge(
    label: String,
    #[props(default)] tone: Tone,
    #[props(default)] icon: Option<Icon>,
) -> Element {
    rsx! {
        span {
            class: "badge {tone.badge_class()}",
            if let Some(icon) = icon {
                span { class: "mr-1", "{icon.glyph()}" }
            }
            "{label}"
        }
    }
}
