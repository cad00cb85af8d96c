use eduswap_sdk::TxPhase;
use leptos::{prelude::*, task::spawn_local};
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router_macro::path;
use tracing::{debug, info, warn};

mod components;
mod constants;
mod error;
mod routes;
mod state;
mod support;
mod utils;
mod wallet;

use components::{LoadingModal, NetworkBanner, WalletConnector};
use constants::APP_TITLE;
use routes::{liquidity::Liquidity, nav::Nav, swap::Swap};
use state::Connection;

pub use error::Error;

#[component]
pub fn App() -> impl IntoView {
    info!("rendering <App/>");

    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Global Contexts

    provide_context(Connection::detect());

    let connection = use_context::<Connection>().expect("connection context missing!");

    Effect::new(move |_| debug!("signer: {:?}", connection.signer.get()));
    Effect::new(move |_| debug!("chain id: {:?}", connection.chain_id.get()));
    Effect::new(move |_| debug!("transaction phase: {:?}", connection.phase.get()));

    // Event Listeners

    let subscriptions = match connection.subscribe() {
        Ok(subscriptions) => subscriptions,
        Err(error) => {
            warn!("not listening for wallet events: {error}");
            Vec::new()
        }
    };

    spawn_local(connection.restore());

    on_cleanup(move || {
        info!("cleaning up <App/>");
        drop(subscriptions);
    });

    let in_flight = Memo::new(move |_| connection.phase.get() != TxPhase::Idle);
    let phase_message = Signal::derive(move || {
        match connection.phase.get() {
            TxPhase::AwaitingWallet => "Confirm the transaction in your wallet",
            TxPhase::AwaitingChain => "Waiting for confirmation",
            TxPhase::Idle => "",
        }
        .to_string()
    });

    view! {
        <Title text=APP_TITLE />
        <Router>
            <header>
                <div class="flex justify-between items-center px-2.5 py-2">
                    <div class="flex items-center gap-6">
                        <div class="my-2 font-bold text-3xl line-clamp-1">{APP_TITLE}</div>
                        <Nav />
                    </div>
                    <WalletConnector />
                </div>
                <NetworkBanner />
                <hr class="m-0 border-border" />
            </header>
            <main class="flex-1 px-2.5 lg:px-8 py-3 overflow-x-auto">
                <Routes transition=true fallback=|| "This page could not be found.">
                    <Route path=path!("/") view=Swap />
                    <Route path=path!("/liquidity") view=Liquidity />
                </Routes>
            </main>
            <LoadingModal when=in_flight message=phase_message />
        </Router>
    }
}
