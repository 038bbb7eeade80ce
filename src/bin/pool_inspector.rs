// src/bin/pool_inspector.rs

use anyhow::{anyhow, Result};
use poolscan::config::Config;
use poolscan::decoders::PoolFactory;
use poolscan::pricing::HttpPricingService;
use poolscan::rpc::ResilientRpcClient;
use poolscan::tokens::MetaplexMetadataService;
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;

    let addresses = env::args()
        .skip(1)
        .map(|raw| Pubkey::from_str(&raw).map_err(|e| anyhow!("adresse invalide `{raw}`: {e}")))
        .collect::<Result<Vec<_>>>()?;
    if addresses.is_empty() {
        return Err(anyhow!("usage: pool_inspector <adresse_pool> [<adresse_pool>...]"));
    }

    let rpc = Arc::new(ResilientRpcClient::new(config.solana_rpc_url, 3, 500));
    let metadata = Arc::new(MetaplexMetadataService::new(rpc.clone()));
    let pricing = Arc::new(HttpPricingService::new(config.price_api_url));
    let factory = PoolFactory::new(rpc, metadata, pricing);

    for (address, result) in factory.resolve_pools(&addresses).await {
        match result {
            Ok(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            Err(e) => eprintln!("!! {address} : {e}"),
        }
    }

    Ok(())
}
