use crate::error::Error;
use leptos::prelude::window;
use tracing::{error, info};

pub fn alert(msg: impl AsRef<str>) {
    let _ = window().alert_with_message(msg.as_ref());
}

/// `0x1234...abcd`
pub fn shorten_address(address: impl ToString) -> String {
    let address = address.to_string();
    if address.len() > 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address // Return the address as is if it's too short to shorten
    }
}

/// Every failed user action ends up here.
pub fn notify_error(context: &str, error: &Error) {
    error!("{context}: {error}");
    alert(error.to_string());
}

pub fn notify_success(message: impl AsRef<str>) {
    info!("{}", message.as_ref());
    alert(message);
}
