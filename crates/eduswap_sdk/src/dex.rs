use crate::{
    constants::{
        CONFIRMATION_TIMEOUT, DEX_CONTRACT, NATIVE_SYMBOL, POLL_INTERVAL, TOKEN_CONTRACT,
        TOKEN_SYMBOL,
    },
    contract_interfaces::{IDex, IERC20},
    timer::{with_timeout, BrowserTimer, Timer},
    Error,
};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use eip1193::{Provider, TransactionReceipt, TransactionRequest};
use std::{rc::Rc, time::Duration};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    Native,
    Token,
}

impl Asset {
    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Native => NATIVE_SYMBOL,
            Asset::Token => TOKEN_SYMBOL,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwapDirection {
    #[default]
    EthToToken,
    TokenToEth,
}

impl SwapDirection {
    pub fn reversed(self) -> Self {
        match self {
            SwapDirection::EthToToken => SwapDirection::TokenToEth,
            SwapDirection::TokenToEth => SwapDirection::EthToToken,
        }
    }

    pub fn input(self) -> Asset {
        match self {
            SwapDirection::EthToToken => Asset::Native,
            SwapDirection::TokenToEth => Asset::Token,
        }
    }

    pub fn output(self) -> Asset {
        self.reversed().input()
    }
}

/// Where a user-initiated transaction currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxPhase {
    #[default]
    Idle,
    AwaitingWallet,
    AwaitingChain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwapReceipt {
    pub approval: Option<TransactionReceipt>,
    pub swap: TransactionReceipt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiquidityReceipt {
    pub eth_amount: U256,
    pub approval: Option<TransactionReceipt>,
    pub deposit: TransactionReceipt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Withdrawal {
    pub eth_amount: U256,
    pub token_amount: U256,
    pub transaction_hash: B256,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Contracts {
    pub dex: Address,
    pub token: Address,
}

impl Default for Contracts {
    fn default() -> Self {
        Self {
            dex: DEX_CONTRACT,
            token: TOKEN_CONTRACT,
        }
    }
}

/// Client for the DEX contract and its paired token, over any EIP-1193 provider.
pub struct Dex<P, T = BrowserTimer> {
    provider: P,
    timer: T,
    contracts: Contracts,
    timeout: Duration,
    poll_interval: Duration,
    observer: Option<Rc<dyn Fn(TxPhase)>>,
}

impl<P: Provider> Dex<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timer: BrowserTimer,
            contracts: Contracts::default(),
            timeout: CONFIRMATION_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            observer: None,
        }
    }
}

impl<P: Provider, T: Timer> Dex<P, T> {
    pub fn with_timer<U: Timer>(self, timer: U) -> Dex<P, U> {
        Dex {
            provider: self.provider,
            timer,
            contracts: self.contracts,
            timeout: self.timeout,
            poll_interval: self.poll_interval,
            observer: self.observer,
        }
    }

    pub fn with_confirmation(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.timeout = timeout;
        self.poll_interval = poll_interval;
        self
    }

    /// Reports every phase change of the transactions this client submits.
    pub fn on_phase(mut self, observer: impl Fn(TxPhase) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn notify(&self, phase: TxPhase) {
        if let Some(observer) = &self.observer {
            observer(phase)
        }
    }

    async fn read<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, Error> {
        let output = self
            .provider
            .call(&TransactionRequest::new(to, call.abi_encode()))
            .await?;

        Ok(C::abi_decode_returns(&output, true)?)
    }

    // Queries

    pub async fn quote(&self, direction: SwapDirection, amount_in: U256) -> Result<U256, Error> {
        let dex = self.contracts.dex;

        let amount_out = match direction {
            SwapDirection::EthToToken => {
                self.read(dex, IDex::calculateEthToTokenCall { ethAmount: amount_in })
                    .await?
                    .tokenAmount
            }
            SwapDirection::TokenToEth => {
                self.read(dex, IDex::calculateTokenToEthCall { tokenAmount: amount_in })
                    .await?
                    .ethAmount
            }
        };

        debug!(?direction, %amount_in, %amount_out, "quote");
        Ok(amount_out)
    }

    pub async fn required_eth_for_liquidity(&self, token_amount: U256) -> Result<U256, Error> {
        let call = IDex::calculateRequiredEthForLiquidityCall {
            tokenAmount: token_amount,
        };
        Ok(self.read(self.contracts.dex, call).await?.ethAmount)
    }

    pub async fn allowance(&self, owner: Address) -> Result<U256, Error> {
        let call = IERC20::allowanceCall {
            owner,
            spender: self.contracts.dex,
        };
        Ok(self.read(self.contracts.token, call).await?.remaining)
    }

    pub async fn balance(&self, owner: Address, asset: Asset) -> Result<U256, Error> {
        match asset {
            Asset::Native => Ok(self.provider.balance(owner).await?),
            Asset::Token => {
                let call = IERC20::balanceOfCall { owner };
                Ok(self.read(self.contracts.token, call).await?.balance)
            }
        }
    }

    // Transactions

    /// Approves the DEX for `amount` unless the current allowance already covers it.
    pub async fn ensure_allowance(
        &self,
        owner: Address,
        amount: U256,
    ) -> Result<Option<TransactionReceipt>, Error> {
        let allowance = self.allowance(owner).await?;
        if allowance >= amount {
            debug!(%allowance, %amount, "allowance is sufficient");
            return Ok(None);
        }

        info!(%allowance, %amount, "requesting approval");
        let call = IERC20::approveCall {
            spender: self.contracts.dex,
            amount,
        };
        let receipt = self.transact(owner, self.contracts.token, call, None).await?;
        Ok(Some(receipt))
    }

    pub async fn swap(
        &self,
        from: Address,
        direction: SwapDirection,
        amount_in: U256,
    ) -> Result<SwapReceipt, Error> {
        let dex = self.contracts.dex;

        match direction {
            SwapDirection::EthToToken => {
                let call = IDex::swapEthToTokenCall {};
                let swap = self.transact(from, dex, call, Some(amount_in)).await?;
                Ok(SwapReceipt {
                    approval: None,
                    swap,
                })
            }
            SwapDirection::TokenToEth => {
                let approval = self.ensure_allowance(from, amount_in).await?;
                let call = IDex::swapTokenToEthCall {
                    tokenAmount: amount_in,
                };
                let swap = self.transact(from, dex, call, None).await?;
                Ok(SwapReceipt { approval, swap })
            }
        }
    }

    /// Deposits `token_amount` together with the native amount the pool currently requires.
    pub async fn add_liquidity(
        &self,
        from: Address,
        token_amount: U256,
    ) -> Result<LiquidityReceipt, Error> {
        let eth_amount = self.required_eth_for_liquidity(token_amount).await?;
        let approval = self.ensure_allowance(from, token_amount).await?;

        let call = IDex::addLiquidityCall {
            tokenAmount: token_amount,
        };
        let deposit = self
            .transact(from, self.contracts.dex, call, Some(eth_amount))
            .await?;

        Ok(LiquidityReceipt {
            eth_amount,
            approval,
            deposit,
        })
    }

    pub async fn remove_liquidity(
        &self,
        from: Address,
        liquidity: U256,
    ) -> Result<Withdrawal, Error> {
        let call = IDex::removeLiquidityCall { liquidity };
        let receipt = self.transact(from, self.contracts.dex, call, None).await?;

        let (eth_amount, token_amount) = withdrawn_amounts(self.contracts.dex, &receipt)
            .ok_or(Error::MissingWithdrawal(receipt.transaction_hash))?;

        Ok(Withdrawal {
            eth_amount,
            token_amount,
            transaction_hash: receipt.transaction_hash,
        })
    }

    async fn transact<C: SolCall>(
        &self,
        from: Address,
        to: Address,
        call: C,
        value: Option<U256>,
    ) -> Result<TransactionReceipt, Error> {
        let mut tx = TransactionRequest::new(to, call.abi_encode()).from(from);
        if let Some(value) = value {
            tx = tx.value(value);
        }

        self.notify(TxPhase::AwaitingWallet);
        let hash = self.provider.send_transaction(&tx).await?;
        info!(%hash, "transaction submitted");

        self.notify(TxPhase::AwaitingChain);
        let receipt = self.wait_for_receipt(hash).await?;

        if !receipt.succeeded() {
            warn!(%hash, "transaction reverted");
            return Err(Error::Reverted(hash));
        }

        info!(%hash, block = ?receipt.block_number, "transaction confirmed");
        Ok(receipt)
    }

    /// Polls for the receipt of `hash`, giving up after the configured timeout.
    pub async fn wait_for_receipt(&self, hash: B256) -> Result<TransactionReceipt, Error> {
        with_timeout(&self.timer, self.timeout, self.poll_receipt(hash))
            .await
            .unwrap_or(Err(Error::TimedOut(hash)))
    }

    async fn poll_receipt(&self, hash: B256) -> Result<TransactionReceipt, Error> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            self.timer.sleep(self.poll_interval).await;
        }
    }
}

/// The first log emitted by `dex` whose data is a pair of words: (native, token).
pub fn withdrawn_amounts(dex: Address, receipt: &TransactionReceipt) -> Option<(U256, U256)> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == dex)
        .find_map(|log| <(U256, U256)>::abi_decode(&log.data, true).ok())
}
