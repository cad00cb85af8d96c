use crate::{
    components::TokenBalance,
    constants::DECIMALS,
    error::Error,
    state::Connection,
    support::{sequenced_quote, RequestSequence},
    utils::{notify_error, notify_success},
};
use eduswap_sdk::{utils::parse_token_amount, SwapDirection, SwapReceipt};
use leptos::{ev, prelude::*, task::spawn_local};
use lucide_leptos::ArrowDownUp;
use reactive_stores::Store;
use tracing::{debug, info};

#[derive(Store, Clone, Debug, Default, PartialEq)]
pub struct SwapForm {
    pub direction: SwapDirection,
    pub amount_in: String,
    pub amount_out: String,
}

impl SwapForm {
    /// Flips which asset is sold. Both amounts are cleared.
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.reversed();
        self.clear();
    }

    pub fn clear(&mut self) {
        self.amount_in.clear();
        self.amount_out.clear();
    }

    pub fn input_symbol(&self) -> &'static str {
        self.direction.input().symbol()
    }

    pub fn output_symbol(&self) -> &'static str {
        self.direction.output().symbol()
    }
}

async fn submit_swap(
    connection: Connection,
    direction: SwapDirection,
    amount_in: &str,
) -> Result<SwapReceipt, Error> {
    let amount = parse_token_amount(amount_in, DECIMALS)
        .filter(|amount| !amount.is_zero())
        .ok_or(Error::InvalidAmount)?;

    let signer = connection.ensure_signer().await?;
    let receipt = connection
        .dex()?
        .swap(signer.address, direction, amount)
        .await?;

    Ok(receipt)
}

#[component]
pub fn Swap() -> impl IntoView {
    info!("rendering <Swap/>");

    on_cleanup(move || {
        info!("cleaning up <Swap/>");
    });

    let connection = use_context::<Connection>().expect("connection context missing!");

    let form = Store::new(SwapForm::default());
    let sequence = StoredValue::new(RequestSequence::new());

    let request_quote = move |input: String| {
        let direction = form.direction().get_untracked();
        let sequence = sequence.get_value();
        let ticket = sequence.next();

        spawn_local(async move {
            let quote = sequenced_quote(&sequence, ticket, &input, |amount| async move {
                let dex = connection.dex()?;
                Ok(dex.quote(direction, amount).await?)
            })
            .await;

            if let Some(amount_out) = quote {
                form.amount_out().set(amount_out);
            }
        });
    };

    let on_input = move |event: ev::Event| {
        let input = event_target_value(&event);
        form.amount_in().set(input.clone());
        request_quote(input);
    };

    let toggle_direction = move |_: ev::MouseEvent| {
        sequence.with_value(RequestSequence::invalidate);
        form.update(SwapForm::toggle_direction);
        debug!(direction = ?form.direction().get_untracked(), "direction toggled");
    };

    let swap_action = Action::new_local(move |_: &()| {
        let (direction, amount_in) =
            form.with_untracked(|form| (form.direction, form.amount_in.clone()));

        async move {
            let result = submit_swap(connection, direction, &amount_in).await;
            connection.settle(&result);

            match result {
                Ok(receipt) => {
                    sequence.with_value(RequestSequence::invalidate);
                    form.update(SwapForm::clear);
                    notify_success(format!(
                        "Swapped {amount_in} {} (tx {})",
                        direction.input().symbol(),
                        receipt.swap.transaction_hash
                    ));
                }
                Err(error) => notify_error("swap", &error),
            }
        }
    });

    let submit = move |_: ev::MouseEvent| {
        if swap_action.pending().get_untracked() {
            return;
        }
        swap_action.dispatch(());
    };

    view! {
        <div class="max-w-md mx-auto flex flex-col gap-3">
            <h2 class="m-0">"Swap"</h2>
            <div class="flex flex-col gap-1">
                <div class="flex justify-between items-center">
                    <label for="amount-in">
                        "From (" {move || form.with(SwapForm::input_symbol)} ")"
                    </label>
                    <TokenBalance asset=Signal::derive(move || form.direction().get().input()) />
                </div>
                <input
                    id="amount-in"
                    type="text"
                    inputmode="decimal"
                    autocomplete="off"
                    placeholder="0.0"
                    prop:value=move || form.amount_in().get()
                    on:input=on_input
                />
            </div>
            <button
                title="Switch direction"
                class="self-center w-10 h-10 p-0 inline-flex items-center justify-center rounded-full"
                on:click=toggle_direction
            >
                <ArrowDownUp size=16 />
            </button>
            <div class="flex flex-col gap-1">
                <div class="flex justify-between items-center">
                    <label for="amount-out">
                        "To (" {move || form.with(SwapForm::output_symbol)} ")"
                    </label>
                    <TokenBalance asset=Signal::derive(move || form.direction().get().output()) />
                </div>
                <input
                    id="amount-out"
                    type="text"
                    placeholder="0.0"
                    readonly
                    prop:value=move || form.amount_out().get()
                />
            </div>
            <button
                class="py-2 px-4 font-semibold bg-primary text-primary-foreground rounded-md"
                on:click=submit
                disabled=move || swap_action.pending().get() || form.amount_in().get().is_empty()
            >
                {move || if swap_action.pending().get() { "Swapping..." } else { "Swap" }}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduswap_sdk::Asset;

    #[test]
    fn toggling_swaps_labels_and_clears_amounts() {
        let mut form = SwapForm {
            direction: SwapDirection::EthToToken,
            amount_in: "1.5".to_string(),
            amount_out: "3.0".to_string(),
        };
        assert_eq!((form.input_symbol(), form.output_symbol()), ("EDU", "DEDU"));

        form.toggle_direction();

        assert_eq!(form.direction, SwapDirection::TokenToEth);
        assert_eq!((form.input_symbol(), form.output_symbol()), ("DEDU", "EDU"));
        assert!(form.amount_in.is_empty());
        assert!(form.amount_out.is_empty());
    }

    #[test]
    fn toggling_twice_restores_the_direction() {
        let mut form = SwapForm::default();

        form.toggle_direction();
        form.toggle_direction();

        assert_eq!(form.direction.input(), Asset::Native);
    }

    #[test]
    fn invalid_amount_is_rejected_before_touching_the_wallet() {
        let owner = Owner::new();
        owner.set();
        let connection = Connection::new(None);

        for input in ["", "0", "abc", "1.0000000000000000001"] {
            let result = futures::executor::block_on(submit_swap(
                connection,
                SwapDirection::EthToToken,
                input,
            ));
            assert_eq!(result, Err(Error::InvalidAmount), "{input:?}");
        }
    }

    #[test]
    fn swapping_without_a_wallet_reports_no_provider() {
        let owner = Owner::new();
        owner.set();
        let connection = Connection::new(None);

        let result = futures::executor::block_on(submit_swap(
            connection,
            SwapDirection::EthToToken,
            "1",
        ));

        assert_eq!(result, Err(Error::NoProvider));
    }
}
