use crate::{
    types::{format_quantity, parse_quantity, TransactionReceipt, TransactionRequest},
    Error,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use serde_json::{json, Value};

/// An EIP-1193 provider. Only `request` is required; everything else is expressed through it.
#[async_trait(?Send)]
pub trait Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error>;

    /// Prompts the wallet for account access.
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        let accounts = self.request("eth_requestAccounts", json!([])).await?;
        Ok(serde_json::from_value(accounts)?)
    }

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        let accounts = self.request("eth_accounts", json!([])).await?;
        Ok(serde_json::from_value(accounts)?)
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        let chain_id = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&chain_id)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), Error> {
        self.request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": format_quantity(chain_id) }]),
        )
        .await
        .map(|_| ())
    }

    async fn revoke_accounts_permission(&self) -> Result<(), Error> {
        self.request("wallet_revokePermissions", json!([{ "eth_accounts": {} }]))
            .await
            .map(|_| ())
    }

    async fn balance(&self, address: Address) -> Result<U256, Error> {
        let balance = self.request("eth_getBalance", json!([address, "latest"])).await?;
        Ok(serde_json::from_value(balance)?)
    }

    /// Executes a read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, Error> {
        let tx = serde_json::to_value(tx)?;
        let output = self.request("eth_call", json!([tx, "latest"])).await?;
        Ok(serde_json::from_value(output)?)
    }

    /// Hands the transaction to the wallet for signing and broadcast.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, Error> {
        let tx = serde_json::to_value(tx)?;
        let hash = self.request("eth_sendTransaction", json!([tx])).await?;
        Ok(serde_json::from_value(hash)?)
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, Error> {
        let receipt = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        Ok(serde_json::from_value(receipt)?)
    }
}
