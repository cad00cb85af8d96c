use crate::error::Error;
use alloy_primitives::Address;
use eip1193::Provider;
use tracing::{debug, info, warn};

/// A connected account on the required chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signer {
    pub address: Address,
    pub chain_id: u64,
}

/// Requests account access and checks the wallet is on `required_chain`.
pub async fn connect(provider: &impl Provider, required_chain: u64) -> Result<Signer, Error> {
    let accounts = provider.request_accounts().await?;
    let address = *accounts.first().ok_or(Error::NotConnected)?;

    let chain_id = provider.chain_id().await?;
    debug!(%address, chain_id, "wallet responded");

    if chain_id != required_chain {
        return Err(Error::WrongNetwork {
            expected: required_chain,
            actual: chain_id,
        });
    }

    info!(%address, "connected");
    Ok(Signer { address, chain_id })
}

/// Reads the wallet's network and any account it already authorized for this site, without
/// prompting. The signer is only restored on the required chain.
pub async fn restore(
    provider: &impl Provider,
    required_chain: u64,
) -> Result<(u64, Option<Signer>), Error> {
    let chain_id = provider.chain_id().await?;
    let accounts = provider.accounts().await?;

    let signer = accounts
        .first()
        .filter(|_| chain_id == required_chain)
        .map(|&address| Signer { address, chain_id });
    debug!(chain_id, ?signer, "restored wallet session");

    Ok((chain_id, signer))
}

/// Contract calls are only made while the wallet is known to be on `required_chain`.
pub fn ensure_network(chain_id: Option<u64>, required_chain: u64) -> Result<(), Error> {
    match chain_id {
        Some(chain_id) if chain_id == required_chain => Ok(()),
        Some(actual) => Err(Error::WrongNetwork {
            expected: required_chain,
            actual,
        }),
        None => Err(Error::UnknownNetwork),
    }
}

/// Asks the wallet to forget this site. Not every wallet supports it, so failures are only logged.
pub async fn disconnect(provider: &impl Provider) {
    match provider.revoke_accounts_permission().await {
        Ok(()) => info!("wallet permissions revoked"),
        Err(error) => warn!("could not revoke wallet permissions: {error}"),
    }
}

pub async fn switch_network(
    provider: &impl Provider,
    required_chain: u64,
) -> Result<Signer, Error> {
    provider.switch_chain(required_chain).await?;
    connect(provider, required_chain).await
}

/// The signer after an `accountsChanged` event.
pub fn on_accounts_changed(signer: Option<Signer>, accounts: &[Address]) -> Option<Signer> {
    let signer = signer?;
    accounts.first().map(|&address| Signer { address, ..signer })
}

/// The signer after a `chainChanged` event.
pub fn on_chain_changed(signer: Option<Signer>, chain_id: u64, required_chain: u64) -> Option<Signer> {
    signer.filter(|_| chain_id == required_chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use eip1193::mock::MockProvider;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    const ALICE: Address = address!("00000000000000000000000000000000000a11ce");
    const BOB: Address = address!("0000000000000000000000000000000000000b0b");

    fn wallet(chain_id: &'static str) -> MockProvider {
        MockProvider::new(move |method, _| match method {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!([ALICE])),
            "eth_chainId" => Ok(json!(chain_id)),
            "wallet_switchEthereumChain" => Ok(Value::Null),
            "wallet_revokePermissions" => Err(eip1193::Error::rpc(-32601, "method not found")),
            other => panic!("unexpected request {other}"),
        })
    }

    #[test]
    fn connects_on_the_required_chain() {
        let signer = block_on(connect(&wallet("0x61"), 97)).unwrap();

        assert_eq!(
            signer,
            Signer {
                address: ALICE,
                chain_id: 97
            }
        );
    }

    #[test]
    fn wrong_network_never_yields_a_signer() {
        let result = block_on(connect(&wallet("0x1"), 97));

        assert_eq!(
            result,
            Err(Error::WrongNetwork {
                expected: 97,
                actual: 1
            })
        );
    }

    #[test]
    fn rejected_connection_is_reported() {
        let provider = MockProvider::new(|_, _| Err(eip1193::Error::rpc(4001, "User rejected")));

        assert_eq!(block_on(connect(&provider, 97)), Err(Error::Rejected));
        assert_eq!(provider.methods(), vec!["eth_requestAccounts"]);
    }

    #[test]
    fn empty_account_list_is_not_a_connection() {
        let provider = MockProvider::new(|_, _| Ok(json!([])));

        assert_eq!(block_on(connect(&provider, 97)), Err(Error::NotConnected));
    }

    #[test]
    fn switch_network_reconnects() {
        let provider = wallet("0x61");

        let signer = block_on(switch_network(&provider, 97)).unwrap();

        assert_eq!(signer.address, ALICE);
        assert_eq!(
            provider.methods(),
            vec!["wallet_switchEthereumChain", "eth_requestAccounts", "eth_chainId"]
        );
    }

    #[test]
    fn disconnect_tolerates_unsupported_revocation() {
        let provider = wallet("0x61");

        block_on(disconnect(&provider));

        assert_eq!(provider.methods(), vec!["wallet_revokePermissions"]);
    }

    #[test]
    fn account_changes_follow_the_wallet() {
        let signer = Some(Signer {
            address: ALICE,
            chain_id: 97,
        });

        assert_eq!(
            on_accounts_changed(signer, &[BOB]).map(|signer| signer.address),
            Some(BOB)
        );
        assert_eq!(on_accounts_changed(signer, &[]), None);
        assert_eq!(on_accounts_changed(None, &[BOB]), None);
    }

    #[test]
    fn leaving_the_required_chain_clears_the_signer() {
        let signer = Some(Signer {
            address: ALICE,
            chain_id: 97,
        });

        assert_eq!(on_chain_changed(signer, 97, 97), signer);
        assert_eq!(on_chain_changed(signer, 1, 97), None);
    }

    #[test]
    fn authorized_session_is_restored_without_a_prompt() {
        let provider = wallet("0x61");

        let (chain_id, signer) = block_on(restore(&provider, 97)).unwrap();

        assert_eq!(chain_id, 97);
        assert_eq!(signer.map(|signer| signer.address), Some(ALICE));
        assert_eq!(provider.methods(), vec!["eth_chainId", "eth_accounts"]);
    }

    #[test]
    fn session_on_another_chain_is_not_restored() {
        let (chain_id, signer) = block_on(restore(&wallet("0x1"), 97)).unwrap();

        assert_eq!(chain_id, 1);
        assert_eq!(signer, None);
    }

    #[test]
    fn unauthorized_site_restores_no_signer() {
        let provider = MockProvider::new(|method, _| match method {
            "eth_chainId" => Ok(json!("0x61")),
            "eth_accounts" => Ok(json!([])),
            other => panic!("unexpected request {other}"),
        });

        assert_eq!(block_on(restore(&provider, 97)), Ok((97, None)));
    }

    #[test]
    fn contract_calls_need_the_required_chain() {
        assert_eq!(ensure_network(Some(97), 97), Ok(()));
        assert_eq!(
            ensure_network(Some(1), 97),
            Err(Error::WrongNetwork {
                expected: 97,
                actual: 1
            })
        );
        assert_eq!(ensure_network(None, 97), Err(Error::UnknownNetwork));
    }
}
