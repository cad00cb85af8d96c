pub mod constants;
pub mod contract_interfaces;
mod dex;
mod error;
pub mod timer;
pub mod utils;

pub use constants::{DECIMALS, DEX_CONTRACT, TOKEN_CONTRACT};
pub use dex::{
    withdrawn_amounts, Asset, Dex, LiquidityReceipt, SwapDirection, SwapReceipt,
    TxPhase, Withdrawal,
};
pub use error::Error;
pub use timer::{with_timeout, BrowserTimer, Timer};
