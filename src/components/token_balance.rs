use crate::{constants::DECIMALS, error::Error, state::Connection};
use eduswap_sdk::{utils::display_token_amount, Asset};
use leptos::{either::Either, prelude::*};
use send_wrapper::SendWrapper;
use tracing::{debug, trace};

/// The connected account's balance of `asset`. Re-read after every confirmed transaction and
/// network change.
#[component]
pub fn TokenBalance(#[prop(into)] asset: Signal<Asset>) -> impl IntoView {
    let connection = use_context::<Connection>().expect("connection context missing!");

    let balance = Resource::new(
        move || {
            (
                connection.address(),
                asset.get(),
                connection.chain_id.get(),
                connection.refresh.get(),
            )
        },
        move |(address, asset, _, _)| {
            SendWrapper::new(async move {
                let address = address.ok_or(Error::NotConnected)?;
                let amount = connection.dex()?.balance(address, asset).await?;
                trace!(%address, ?asset, %amount, "balance");
                Ok::<_, Error>(display_token_amount(amount, DECIMALS))
            })
        },
    );

    // A missing balance is not worth an alert; the title shows why.
    view! {
        <div class="py-0 px-2 text-sm text-muted-foreground">
            <Suspense fallback=|| view! { <span>"Balance: ..."</span> }>
                {move || Suspend::new(async move {
                    match balance.await {
                        Ok(amount) => Either::Left(view! {
                            <span>
                                "Balance: "<span class="text-white font-medium">{amount}</span>" "
                                {move || asset.get().symbol()}
                            </span>
                        }),
                        Err(error) => {
                            debug!("balance unavailable: {error}");
                            Either::Right(view! { <span title=error.to_string()>"Balance: -"</span> })
                        }
                    }
                })}
            </Suspense>
        </div>
    }
}
