pub use eduswap_sdk::constants::{DECIMALS, NATIVE_SYMBOL, TOKEN_SYMBOL};

pub static REQUIRED_CHAIN_ID: u64 = 97;
pub static NETWORK_NAME: &str = "EDU Chain Testnet";

pub static APP_TITLE: &str = "EduSwap";
