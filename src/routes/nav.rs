use leptos::prelude::*;
use leptos_router::components::A;
use lucide_leptos::{ArrowDownUp, Droplets};

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="flex gap-4">
            <A href="/">
                <div class="flex items-center gap-1">
                    <ArrowDownUp size=16 />
                    "Swap"
                </div>
            </A>
            <A href="/liquidity">
                <div class="flex items-center gap-1">
                    <Droplets size=16 />
                    "Liquidity"
                </div>
            </A>
        </nav>
    }
}
