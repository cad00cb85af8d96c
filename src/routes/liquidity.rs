use crate::{
    constants::{DECIMALS, NATIVE_SYMBOL, TOKEN_SYMBOL},
    error::Error,
    state::Connection,
    support::{sequenced_quote, RequestSequence},
    utils::{notify_error, notify_success},
};
use alloy_primitives::U256;
use eduswap_sdk::{
    utils::{display_token_amount, parse_token_amount},
    LiquidityReceipt, Withdrawal,
};
use leptos::{ev, prelude::*, task::spawn_local};
use lucide_leptos::{Minus, Plus};
use reactive_stores::Store;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LiquidityTab {
    #[default]
    Add,
    Remove,
}

/// The amounts returned by the last successful withdrawal, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawnAmounts {
    pub eth: String,
    pub token: String,
}

impl From<&Withdrawal> for WithdrawnAmounts {
    fn from(withdrawal: &Withdrawal) -> Self {
        Self {
            eth: display_token_amount(withdrawal.eth_amount, DECIMALS),
            token: display_token_amount(withdrawal.token_amount, DECIMALS),
        }
    }
}

#[derive(Store, Clone, Debug, Default, PartialEq)]
pub struct LiquidityForm {
    pub tab: LiquidityTab,
    pub token_amount: String,
    pub required_eth: String,
    pub liquidity_amount: String,
    pub last_withdrawal: Option<WithdrawnAmounts>,
}

impl LiquidityForm {
    /// Each tab keeps its own input. The last withdrawal belongs to the remove tab.
    pub fn select_tab(&mut self, tab: LiquidityTab) {
        self.tab = tab;
    }

    pub fn shows_withdrawal(&self) -> Option<&WithdrawnAmounts> {
        match self.tab {
            LiquidityTab::Remove => self.last_withdrawal.as_ref(),
            LiquidityTab::Add => None,
        }
    }

    pub fn clear_deposit(&mut self) {
        self.token_amount.clear();
        self.required_eth.clear();
    }

    /// Shows the outcome of a withdrawal. A failed one leaves the previous result in place.
    pub fn record_withdrawal(&mut self, result: &Result<Withdrawal, Error>) {
        if let Ok(withdrawal) = result {
            self.last_withdrawal = Some(withdrawal.into());
            self.liquidity_amount.clear();
        }
    }
}

fn parse_amount(input: &str) -> Result<U256, Error> {
    parse_token_amount(input, DECIMALS)
        .filter(|amount| !amount.is_zero())
        .ok_or(Error::InvalidAmount)
}

async fn submit_deposit(
    connection: Connection,
    token_amount: &str,
) -> Result<LiquidityReceipt, Error> {
    let token_amount = parse_amount(token_amount)?;
    let signer = connection.ensure_signer().await?;

    let receipt = connection
        .dex()?
        .add_liquidity(signer.address, token_amount)
        .await?;

    Ok(receipt)
}

async fn submit_withdrawal(connection: Connection, liquidity: &str) -> Result<Withdrawal, Error> {
    let liquidity = parse_amount(liquidity)?;
    let signer = connection.ensure_signer().await?;

    let withdrawal = connection
        .dex()?
        .remove_liquidity(signer.address, liquidity)
        .await?;

    Ok(withdrawal)
}

#[component]
pub fn Liquidity() -> impl IntoView {
    info!("rendering <Liquidity/>");

    on_cleanup(move || {
        info!("cleaning up <Liquidity/>");
    });

    let connection = use_context::<Connection>().expect("connection context missing!");

    let form = Store::new(LiquidityForm::default());
    let sequence = StoredValue::new(RequestSequence::new());

    let select_tab = move |tab: LiquidityTab| {
        form.update(|form| form.select_tab(tab));
    };

    let on_deposit_input = move |event: ev::Event| {
        let input = event_target_value(&event);
        form.token_amount().set(input.clone());

        let sequence = sequence.get_value();
        let ticket = sequence.next();

        spawn_local(async move {
            let required = sequenced_quote(&sequence, ticket, &input, |amount| async move {
                let dex = connection.dex()?;
                Ok(dex.required_eth_for_liquidity(amount).await?)
            })
            .await;

            if let Some(required_eth) = required {
                form.required_eth().set(required_eth);
            }
        });
    };

    let on_withdrawal_input = move |event: ev::Event| {
        form.liquidity_amount().set(event_target_value(&event));
    };

    let add_action = Action::new_local(move |_: &()| {
        let token_amount = form.token_amount().get_untracked();

        async move {
            let result = submit_deposit(connection, &token_amount).await;
            connection.settle(&result);

            match result {
                Ok(receipt) => {
                    sequence.with_value(RequestSequence::invalidate);
                    form.update(LiquidityForm::clear_deposit);
                    notify_success(format!(
                        "Added {token_amount} {TOKEN_SYMBOL} and {} {NATIVE_SYMBOL} to the pool",
                        display_token_amount(receipt.eth_amount, DECIMALS)
                    ));
                }
                Err(error) => notify_error("add liquidity", &error),
            }
        }
    });

    let remove_action = Action::new_local(move |_: &()| {
        let liquidity = form.liquidity_amount().get_untracked();

        async move {
            let result = submit_withdrawal(connection, &liquidity).await;
            connection.settle(&result);
            form.update(|form| form.record_withdrawal(&result));

            match result {
                Ok(withdrawal) => {
                    debug!(?withdrawal, "liquidity removed");
                    let amounts = WithdrawnAmounts::from(&withdrawal);
                    notify_success(format!(
                        "Removed liquidity: received {} {NATIVE_SYMBOL} and {} {TOKEN_SYMBOL}",
                        amounts.eth, amounts.token
                    ));
                }
                Err(error) => notify_error("remove liquidity", &error),
            }
        }
    });

    let pending = Memo::new(move |_| add_action.pending().get() || remove_action.pending().get());

    let submit_add = move |_: ev::MouseEvent| {
        if !pending.get_untracked() {
            add_action.dispatch(());
        }
    };

    let submit_remove = move |_: ev::MouseEvent| {
        if !pending.get_untracked() {
            remove_action.dispatch(());
        }
    };

    let tab_class = move |tab: LiquidityTab| {
        if form.tab().get() == tab {
            "flex-1 py-2 font-semibold bg-secondary text-secondary-foreground rounded-md"
        } else {
            "flex-1 py-2 bg-transparent text-muted-foreground rounded-md"
        }
    };

    view! {
        <div class="max-w-md mx-auto flex flex-col gap-3">
            <h2 class="m-0">"Liquidity"</h2>
            <div class="flex gap-2">
                <button
                    class=move || tab_class(LiquidityTab::Add)
                    on:click=move |_| select_tab(LiquidityTab::Add)
                >
                    <div class="flex items-center justify-center gap-1">
                        <Plus size=16 />
                        "Add"
                    </div>
                </button>
                <button
                    class=move || tab_class(LiquidityTab::Remove)
                    on:click=move |_| select_tab(LiquidityTab::Remove)
                >
                    <div class="flex items-center justify-center gap-1">
                        <Minus size=16 />
                        "Remove"
                    </div>
                </button>
            </div>
            <Show
                when=move || form.tab().get() == LiquidityTab::Add
                fallback=move || {
                    view! {
                        <div class="flex flex-col gap-1">
                            <label for="liquidity-amount">"Liquidity to withdraw"</label>
                            <input
                                id="liquidity-amount"
                                type="text"
                                inputmode="decimal"
                                autocomplete="off"
                                placeholder="0.0"
                                prop:value=move || form.liquidity_amount().get()
                                on:input=on_withdrawal_input
                            />
                        </div>
                        <button
                            class="py-2 px-4 font-semibold bg-primary text-primary-foreground rounded-md"
                            on:click=submit_remove
                            disabled=move || pending.get() || form.liquidity_amount().get().is_empty()
                        >
                            {move || {
                                if remove_action.pending().get() {
                                    "Removing..."
                                } else {
                                    "Remove Liquidity"
                                }
                            }}
                        </button>
                        {move || {
                            form.with(|form| form.shows_withdrawal().cloned())
                                .map(|amounts| {
                                    view! {
                                        <div class="p-3 text-sm border border-solid border-border rounded-md">
                                            <div class="font-semibold">"Last withdrawal"</div>
                                            <div>{amounts.eth}" "{NATIVE_SYMBOL}</div>
                                            <div>{amounts.token}" "{TOKEN_SYMBOL}</div>
                                        </div>
                                    }
                                })
                        }}
                    }
                }
            >
                <div class="flex flex-col gap-1">
                    <label for="token-amount">{TOKEN_SYMBOL}" amount"</label>
                    <input
                        id="token-amount"
                        type="text"
                        inputmode="decimal"
                        autocomplete="off"
                        placeholder="0.0"
                        prop:value=move || form.token_amount().get()
                        on:input=on_deposit_input
                    />
                </div>
                <div class="flex flex-col gap-1">
                    <label for="required-eth">{NATIVE_SYMBOL}" required"</label>
                    <input
                        id="required-eth"
                        type="text"
                        placeholder="0.0"
                        readonly
                        prop:value=move || form.required_eth().get()
                    />
                </div>
                <button
                    class="py-2 px-4 font-semibold bg-primary text-primary-foreground rounded-md"
                    on:click=submit_add
                    disabled=move || pending.get() || form.token_amount().get().is_empty()
                >
                    {move || if add_action.pending().get() { "Adding..." } else { "Add Liquidity" }}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    fn withdrawal(eth: u64, token: u64) -> Withdrawal {
        Withdrawal {
            eth_amount: ether(eth),
            token_amount: ether(token),
            transaction_hash: B256::repeat_byte(1),
        }
    }

    #[test]
    fn successful_withdrawal_is_displayed() {
        let mut form = LiquidityForm {
            tab: LiquidityTab::Remove,
            liquidity_amount: "4".to_string(),
            ..Default::default()
        };

        form.record_withdrawal(&Ok(withdrawal(1, 30)));

        assert_eq!(
            form.last_withdrawal,
            Some(WithdrawnAmounts {
                eth: "1.0".to_string(),
                token: "30.0".to_string(),
            })
        );
        assert!(form.liquidity_amount.is_empty());
    }

    #[test]
    fn failed_withdrawal_keeps_the_previous_result() {
        let mut form = LiquidityForm::default();
        form.record_withdrawal(&Ok(withdrawal(2, 5)));
        form.liquidity_amount = "1".to_string();
        let before = form.clone();

        form.record_withdrawal(&Err(Error::Rejected));
        form.record_withdrawal(&Err(Error::TimedOut(B256::ZERO)));

        assert_eq!(form, before);
    }

    #[test]
    fn each_tab_keeps_its_own_input() {
        let mut form = LiquidityForm {
            token_amount: "10".to_string(),
            required_eth: "2.0".to_string(),
            ..Default::default()
        };

        form.select_tab(LiquidityTab::Remove);
        form.liquidity_amount = "4".to_string();
        form.select_tab(LiquidityTab::Add);

        assert_eq!(form.tab, LiquidityTab::Add);
        assert_eq!(form.token_amount, "10");
        assert_eq!(form.required_eth, "2.0");
        assert_eq!(form.liquidity_amount, "4");
    }

    #[test]
    fn withdrawal_result_only_shows_on_the_remove_tab() {
        let mut form = LiquidityForm::default();
        form.record_withdrawal(&Ok(withdrawal(1, 1)));

        assert_eq!(form.shows_withdrawal(), None);

        form.select_tab(LiquidityTab::Remove);
        assert_eq!(
            form.shows_withdrawal().map(|amounts| amounts.token.as_str()),
            Some("1.0")
        );
    }

    #[test]
    fn zero_and_malformed_amounts_are_invalid() {
        assert_eq!(parse_amount("0"), Err(Error::InvalidAmount));
        assert_eq!(parse_amount("1e3"), Err(Error::InvalidAmount));
        assert_eq!(parse_amount("0.5"), Ok(ether(1) / U256::from(2)));
    }

    #[test]
    fn deposit_without_a_wallet_reports_no_provider() {
        let owner = Owner::new();
        owner.set();
        let connection = Connection::new(None);

        let result = futures::executor::block_on(submit_deposit(connection, "10"));

        assert_eq!(result, Err(Error::NoProvider));
    }
}
