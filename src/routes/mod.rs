pub mod liquidity;
pub mod nav;
pub mod swap;
