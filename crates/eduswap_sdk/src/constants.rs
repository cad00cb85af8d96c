use alloy_primitives::{address, Address};
use std::time::Duration;

pub const DEX_CONTRACT: Address = address!("b7f335F8898274b954895a4291Fa19f81B7173fD");
pub const TOKEN_CONTRACT: Address = address!("c094c8843Ef7329C4ba6De95afF792e650ce74A0");

/// Both the native asset and the token use 18 decimals.
pub const DECIMALS: u8 = 18;

pub const NATIVE_SYMBOL: &str = "EDU";
pub const TOKEN_SYMBOL: &str = "DEDU";

pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);
pub const POLL_INTERVAL: Duration = Duration::from_millis(1_500);
