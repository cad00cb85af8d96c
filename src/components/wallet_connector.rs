use crate::{
    state::Connection,
    utils::{notify_error, shorten_address},
};
use leptos::prelude::*;
use lucide_leptos::{Power, Wallet};
use tracing::info;

#[component]
pub fn WalletConnector() -> impl IntoView {
    info!("rendering <WalletConnector/>");

    on_cleanup(move || {
        info!("cleaning up <WalletConnector/>");
    });

    let connection = use_context::<Connection>().expect("connection context missing!");

    let connect_action = Action::new_local(move |_: &()| async move {
        let result = connection.connect().await;
        if let Err(error) = &result {
            notify_error("connect", error);
        }
        result
    });

    let disconnect_action = Action::new_local(move |_: &()| connection.disconnect());

    let address = move || connection.address();

    view! {
        <Show
            when=move || address().is_some()
            fallback=move || {
                view! {
                    <button
                        on:click=move |_| _ = connect_action.dispatch(())
                        disabled=connect_action.pending()
                        class="min-w-24 text-sm font-medium py-2 px-4 border-none
                        bg-primary text-primary-foreground rounded-md"
                    >
                        <div class="h-6 flex flex-row items-center gap-2">
                            <Wallet size=16 />
                            "Connect Wallet"
                        </div>
                    </button>
                }
            }
        >
            <div class="flex items-center gap-2">
                <div
                    title=move || address().map(|address| address.to_string())
                    class="text-sm font-semibold leading-none px-4 py-1.5 border border-solid border-muted-foreground rounded-sm"
                >
                    {move || address().map(shorten_address)}
                </div>
                <button
                    title="Disconnect wallet"
                    on:click=move |_| _ = disconnect_action.dispatch(())
                    disabled=disconnect_action.pending()
                    class="w-10 h-10 p-0 inline-flex items-center justify-center rounded-full bg-transparent
                    border border-solid border-border"
                >
                    <Power size=16 />
                </button>
            </div>
        </Show>
    }
}
