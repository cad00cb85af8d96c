mod quote;
mod sequence;

pub use quote::sequenced_quote;
pub use sequence::{RequestSequence, Ticket};
