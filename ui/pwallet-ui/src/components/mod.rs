pub mod account_detail;
pub mod account_transactions;
pub mod chain_status;
pub mod layout;
pub mod nft_render;
