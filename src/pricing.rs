// src/pricing.rs

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Le "contrat" du service de prix. Peut échouer ; l'appelant traite
/// l'échec comme "valeur indisponible", jamais comme une erreur fatale.
#[async_trait]
pub trait PricingService: Send + Sync {
    async fn price_in_usd(
        &self,
        symbol_a: &str,
        amount_a: f64,
        symbol_b: &str,
        amount_b: f64,
    ) -> Result<f64>;
}

// --- Structures pour la réponse de l'API de prix ---
#[derive(Debug, Deserialize)]
struct PriceResponse {
    prices: HashMap<String, f64>,
}

/// Implémentation HTTP : interroge un endpoint qui renvoie des prix USD
/// indexés par symbole, puis valorise les deux montants humains.
pub struct HttpPricingService {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpPricingService {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn price_in_usd(
        &self,
        symbol_a: &str,
        amount_a: f64,
        symbol_b: &str,
        amount_b: f64,
    ) -> Result<f64> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| anyhow!("no price endpoint configured"))?;

        let response = self
            .client
            .get(endpoint)
            .query(&[("symbols", format!("{symbol_a},{symbol_b}"))])
            .send()
            .await?
            .error_for_status()?
            .json::<PriceResponse>()
            .await?;

        let price_of = |symbol: &str| {
            response
                .prices
                .get(symbol)
                .copied()
                .ok_or_else(|| anyhow!("no USD price for symbol {symbol}"))
        };

        Ok(amount_a * price_of(symbol_a)? + amount_b * price_of(symbol_b)?)
    }
}
