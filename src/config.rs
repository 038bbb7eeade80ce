use serde::Deserialize;
use anyhow::Result;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub solana_rpc_url: String,
    /// Endpoint HTTP optionnel pour l'estimation de valeur en USD.
    /// Sans lui, le champ de valeur est simplement omis des enregistrements.
    pub price_api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }
}
