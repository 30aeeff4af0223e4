//! Per-page document metadata.

use leptos::prelude::*;
use leptos_meta::{Meta, Title};

/// Sets the document title and the `description` meta tag for a route.
#[component]
pub fn PageMeta(#[prop(into)] title: String, #[prop(into)] description: String) -> impl IntoView {
    view! {
        <Title text=title/>
        <Meta name="description" content=description/>
    }
}
