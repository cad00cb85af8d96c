use alloy_primitives::B256;

// The Serialize and Deserialize traits are derived so Errors can be stored in Actions and
// Resources like any other value.
#[derive(thiserror::Error, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No wallet found. Please install MetaMask or another Ethereum wallet.")]
    NoProvider,

    #[error("Please switch your wallet to chain {expected} (currently on chain {actual}).")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Could not determine which network your wallet is on.")]
    UnknownNetwork,

    #[error("Please connect your wallet first.")]
    NotConnected,

    #[error("Please enter a valid amount.")]
    InvalidAmount,

    #[error("The request was rejected in your wallet.")]
    Rejected,

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Transaction {0} was reverted.")]
    Reverted(B256),

    #[error("Transaction {0} was not confirmed in time. It may still confirm later.")]
    TimedOut(B256),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn generic(message: impl ToString) -> Self {
        let message = message.to_string();
        Error::Generic(message)
    }
}

impl From<eip1193::Error> for Error {
    fn from(error: eip1193::Error) -> Self {
        match error {
            eip1193::Error::UserRejected => Error::Rejected,
            error => Error::Wallet(error.to_string()),
        }
    }
}

impl From<eduswap_sdk::Error> for Error {
    fn from(error: eduswap_sdk::Error) -> Self {
        match error {
            eduswap_sdk::Error::Provider(error) => error.into(),
            eduswap_sdk::Error::Abi(message) => Error::Contract(message),
            eduswap_sdk::Error::Reverted(hash) => Error::Reverted(hash),
            eduswap_sdk::Error::TimedOut(hash) => Error::TimedOut(hash),
            error @ eduswap_sdk::Error::MissingWithdrawal(_) => Error::Contract(error.to_string()),
        }
    }
}
