use crate::{
    constants::REQUIRED_CHAIN_ID,
    error::Error,
    wallet::{self, Signer},
};
use alloy_primitives::Address;
use eduswap_sdk::{Dex, TxPhase};
use eip1193::{types::parse_quantity, InjectedProvider, Subscription};
use leptos::prelude::*;
use tracing::{debug, info, warn};

/// The wallet connection shared by every view.
///
/// The provider is detected once when the app starts. Components never construct providers.
#[derive(Copy, Clone)]
pub struct Connection {
    provider: StoredValue<Option<InjectedProvider>>,
    pub signer: RwSignal<Option<Signer>>,
    /// The wallet's network as last reported, `None` until it has been read.
    pub chain_id: RwSignal<Option<u64>>,
    pub phase: RwSignal<TxPhase>,
    /// Bumped after every confirmed transaction. Balances re-read when it changes.
    pub refresh: RwSignal<u64>,
}

impl Connection {
    pub fn new(provider: Option<InjectedProvider>) -> Self {
        match provider {
            Some(_) => debug!("injected provider detected"),
            None => warn!("no injected provider found"),
        }

        Self {
            provider: StoredValue::new(provider),
            signer: RwSignal::new(None),
            chain_id: RwSignal::new(None),
            phase: RwSignal::new(TxPhase::Idle),
            refresh: RwSignal::new(0),
        }
    }

    pub fn detect() -> Self {
        Self::new(InjectedProvider::detect())
    }

    pub fn provider(&self) -> Result<InjectedProvider, Error> {
        self.provider.get_value().ok_or(Error::NoProvider)
    }

    pub fn has_provider(&self) -> bool {
        self.provider.with_value(Option::is_some)
    }

    pub fn address(&self) -> Option<Address> {
        self.signer.get().map(|signer| signer.address)
    }

    pub fn on_required_network(&self) -> bool {
        self.chain_id.get() == Some(REQUIRED_CHAIN_ID)
    }

    pub fn ensure_network(&self) -> Result<(), Error> {
        wallet::ensure_network(self.chain_id.get_untracked(), REQUIRED_CHAIN_ID)
    }

    /// A client whose transaction phases drive [`Connection::phase`]. Refused off the required chain.
    pub fn dex(&self) -> Result<Dex<InjectedProvider>, Error> {
        let provider = self.provider()?;
        self.ensure_network()?;

        let phase = self.phase;
        Ok(Dex::new(provider).on_phase(move |next| phase.set(next)))
    }

    /// Picks up the wallet's network and an already authorized account when the app starts.
    pub async fn restore(self) {
        let Ok(provider) = self.provider() else {
            return;
        };

        match wallet::restore(&provider, REQUIRED_CHAIN_ID).await {
            Ok((chain_id, signer)) => {
                self.chain_id.set(Some(chain_id));
                self.signer.set(signer);
            }
            Err(error) => warn!("could not read the wallet session: {error}"),
        }
    }

    pub async fn connect(self) -> Result<Signer, Error> {
        let provider = self.provider()?;

        let result = wallet::connect(&provider, REQUIRED_CHAIN_ID).await;
        self.record(&result);
        result
    }

    fn record(&self, result: &Result<Signer, Error>) {
        self.signer.set(result.as_ref().ok().copied());
        match result {
            Ok(signer) => self.chain_id.set(Some(signer.chain_id)),
            Err(Error::WrongNetwork { actual, .. }) => self.chain_id.set(Some(*actual)),
            Err(_) => {}
        }
    }

    /// The current signer, connecting first if there is none.
    pub async fn ensure_signer(self) -> Result<Signer, Error> {
        match self.signer.get_untracked() {
            Some(signer) => Ok(signer),
            None => self.connect().await.map_err(|error| match error {
                Error::Rejected => Error::NotConnected,
                error => error,
            }),
        }
    }

    pub async fn disconnect(self) {
        self.signer.set(None);
        if let Ok(provider) = self.provider() {
            wallet::disconnect(&provider).await;
        }
        info!("disconnected");
    }

    pub async fn switch_network(self) -> Result<Signer, Error> {
        let provider = self.provider()?;

        let result = wallet::switch_network(&provider, REQUIRED_CHAIN_ID).await;
        self.record(&result);
        result
    }

    /// Returns the phase to idle once a transaction flow ends, whatever the outcome.
    pub fn settle<T>(&self, result: &Result<T, Error>) {
        self.phase.set(TxPhase::Idle);
        if result.is_ok() {
            self.refresh.update(|count| *count += 1);
        }
    }

    /// Follows account and network changes made in the wallet.
    pub fn subscribe(self) -> Result<Vec<Subscription>, Error> {
        let provider = self.provider()?;

        let accounts_changed = provider.on("accountsChanged", move |accounts| {
            let accounts: Vec<Address> = match serde_wasm_bindgen::from_value(accounts) {
                Ok(accounts) => accounts,
                Err(error) => {
                    warn!("unreadable accountsChanged payload: {error}");
                    return;
                }
            };
            debug!(?accounts, "accounts changed");
            self.signer
                .update(|signer| *signer = wallet::on_accounts_changed(*signer, &accounts));
        })?;

        let chain_changed = provider.on("chainChanged", move |chain_id| {
            let chain_id = match serde_wasm_bindgen::from_value(chain_id)
                .map_err(eip1193::Error::from)
                .and_then(|chain_id| parse_quantity(&chain_id))
            {
                Ok(chain_id) => chain_id,
                Err(error) => {
                    warn!("unreadable chainChanged payload: {error}");
                    return;
                }
            };
            debug!(chain_id, "chain changed");
            self.chain_id.set(Some(chain_id));
            self.signer.update(|signer| {
                *signer = wallet::on_chain_changed(*signer, chain_id, REQUIRED_CHAIN_ID)
            });
        })?;

        Ok(vec![accounts_changed, chain_changed])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_resets_the_phase_and_refreshes_on_success() {
        let owner = Owner::new();
        owner.set();

        let connection = Connection::new(None);
        connection.phase.set(TxPhase::AwaitingChain);

        connection.settle(&Err::<(), _>(Error::Rejected));
        assert_eq!(connection.phase.get_untracked(), TxPhase::Idle);
        assert_eq!(connection.refresh.get_untracked(), 0);

        connection.phase.set(TxPhase::AwaitingWallet);
        connection.settle(&Ok(()));
        assert_eq!(connection.phase.get_untracked(), TxPhase::Idle);
        assert_eq!(connection.refresh.get_untracked(), 1);
    }

    #[test]
    fn missing_provider_is_reported() {
        let owner = Owner::new();
        owner.set();

        let connection = Connection::new(None);

        assert!(!connection.has_provider());
        assert_eq!(connection.provider().err(), Some(Error::NoProvider));
        assert!(connection.dex().is_err());
    }

    #[test]
    fn contract_calls_are_refused_off_the_required_chain() {
        let owner = Owner::new();
        owner.set();

        let connection = Connection::new(None);
        assert_eq!(connection.ensure_network(), Err(Error::UnknownNetwork));

        connection.chain_id.set(Some(1));
        assert_eq!(
            connection.ensure_network(),
            Err(Error::WrongNetwork {
                expected: REQUIRED_CHAIN_ID,
                actual: 1
            })
        );
        assert!(!connection.on_required_network());

        connection.chain_id.set(Some(REQUIRED_CHAIN_ID));
        assert_eq!(connection.ensure_network(), Ok(()));
        assert!(connection.on_required_network());
    }

    #[test]
    fn connection_outcomes_update_the_known_network() {
        let owner = Owner::new();
        owner.set();

        let connection = Connection::new(None);
        connection.record(&Err(Error::WrongNetwork {
            expected: REQUIRED_CHAIN_ID,
            actual: 1,
        }));
        assert_eq!(connection.chain_id.get_untracked(), Some(1));
        assert_eq!(connection.signer.get_untracked(), None);

        let signer = Signer {
            address: Address::repeat_byte(0xaa),
            chain_id: REQUIRED_CHAIN_ID,
        };
        connection.record(&Ok(signer));
        assert_eq!(connection.chain_id.get_untracked(), Some(REQUIRED_CHAIN_ID));
        assert_eq!(connection.signer.get_untracked(), Some(signer));

        connection.record(&Err(Error::Rejected));
        assert_eq!(connection.chain_id.get_untracked(), Some(REQUIRED_CHAIN_ID));
    }
}
