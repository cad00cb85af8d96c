use alloy_primitives::B256;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] eip1193::Error),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("Timed out waiting for transaction {0} to confirm")]
    TimedOut(B256),

    #[error("Transaction {0} did not report the withdrawn amounts")]
    MissingWithdrawal(B256),
}

impl From<alloy_sol_types::Error> for Error {
    fn from(error: alloy_sol_types::Error) -> Self {
        Error::Abi(error.to_string())
    }
}
