use crate::{
    constants::{NETWORK_NAME, REQUIRED_CHAIN_ID},
    state::Connection,
    utils::notify_error,
};
use leptos::prelude::*;
use tracing::info;

/// Names the network the app needs and offers to switch the wallet to it.
#[component]
pub fn NetworkBanner() -> impl IntoView {
    info!("rendering <NetworkBanner/>");

    let connection = use_context::<Connection>().expect("connection context missing!");

    let switch_action = Action::new_local(move |_: &()| async move {
        if let Err(error) = connection.switch_network().await {
            notify_error("switch network", &error);
        }
    });

    view! {
        <Show when=move || connection.signer.get().is_none() || !connection.on_required_network()>
            <div class="flex flex-wrap items-center justify-center gap-2 px-4 py-2 text-sm bg-secondary text-secondary-foreground">
                <span>
                    "This app runs on " <strong>{NETWORK_NAME}</strong> " (chain id "
                    {REQUIRED_CHAIN_ID} ")."
                </span>
                <Show
                    when=move || connection.has_provider()
                    fallback=|| view! { <span>"Install a browser wallet to continue."</span> }
                >
                    <button
                        on:click=move |_| _ = switch_action.dispatch(())
                        disabled=switch_action.pending()
                        class="text-xs font-medium py-1 px-3 rounded-md"
                    >
                        "Switch network"
                    </button>
                </Show>
            </div>
        </Show>
    }
}
