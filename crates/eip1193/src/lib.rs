//! Typed access to the wallet provider injected into the page (`window.ethereum`).

mod error;
mod injected;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod provider;
pub mod types;

pub use error::{Error, USER_REJECTED_REQUEST};
pub use injected::{InjectedProvider, Subscription};
pub use provider::Provider;
pub use types::{Log, TransactionReceipt, TransactionRequest};
