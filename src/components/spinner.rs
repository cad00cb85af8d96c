use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional, into)] size: Option<String>) -> impl IntoView {
    let size = size.unwrap_or("h-4 w-4".to_string());

    view! {
        <svg
            class=format!("animate-spin {size}")
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" />
            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8v4a4 4 0 00-4 4H4z" />
        </svg>
    }
}
