use super::{RequestSequence, Ticket};
use crate::{constants::DECIMALS, error::Error};
use alloy_primitives::U256;
use eduswap_sdk::utils::{display_token_amount, parse_token_amount};
use std::future::Future;
use tracing::{debug, error};

/// Quotes the amount typed into a form field.
///
/// `ticket` must be taken when the input changes. Returns the text for the derived field, or
/// `None` when a newer request has been issued since and this response must be dropped. Empty or
/// malformed input, and failed quotes, clear the field. Zero is a valid amount and is quoted.
pub async fn sequenced_quote<F, Fut>(
    sequence: &RequestSequence,
    ticket: Ticket,
    input: &str,
    fetch: F,
) -> Option<String>
where
    F: FnOnce(U256) -> Fut,
    Fut: Future<Output = Result<U256, Error>>,
{
    let Some(amount) = parse_token_amount(input, DECIMALS) else {
        return sequence.is_current(ticket).then(String::new);
    };

    let output = match fetch(amount).await {
        Ok(quote) => display_token_amount(quote, DECIMALS),
        Err(error) => {
            error!("quote failed: {error}");
            String::new()
        }
    };

    if sequence.is_current(ticket) {
        Some(output)
    } else {
        debug!(?ticket, "discarding stale quote");
        None
    }
}
