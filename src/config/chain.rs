use std::env;

/// Payment-chain parameters.
///
/// Built once at startup and shared immutably through the application state;
/// handlers never reconfigure the chain connection mid-flight.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Contract address of the stablecoin used for tips and subscriptions.
    pub stablecoin_address: String,
    pub stablecoin_symbol: String,
}

impl ChainConfig {
    pub fn from_env() -> Self {
        Self {
            rpc_url: env::var("CHAIN_RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8545".to_string()),
            chain_id: env::var("CHAIN_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(84532), // Base Sepolia
            stablecoin_address: env::var("STABLECOIN_ADDRESS")
                .unwrap_or_else(|_| "0x036cbd53842c5426634e7929541ec2318f3dcf7e".to_string()),
            stablecoin_symbol: env::var("STABLECOIN_SYMBOL")
                .unwrap_or_else(|_| "USDC".to_string()),
        }
    }
}
