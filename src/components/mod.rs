mod loading_modal;
mod network_banner;
mod spinner;
mod token_balance;
mod wallet_connector;

pub use loading_modal::LoadingModal;
pub use network_banner::NetworkBanner;
pub use spinner::Spinner;
pub use token_balance::TokenBalance;
pub use wallet_connector::WalletConnector;
