// src/normalizer.rs

use crate::decoders::Pool;
use crate::health::HealthReport;
use crate::pricing::PricingService;
use crate::resolver::ResolvedReserves;
use crate::tokens::{TokenDisplay, TokenMetadataService};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Descripteur du token LP. Seul le pump.fun AMM en porte un dans son
/// compte ; tous les autres protocoles émettent la sentinelle explicite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LpToken {
    Mint { mint: String, supply: u64 },
    NotApplicable,
}

/// L'enregistrement unifié : la seule forme dont dépendent les
/// consommateurs, identique quel que soit le protocole d'origine.
/// Aucun nom de champ protocolaire ne fuit ici.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustedPoolReserves {
    pub address: String,
    pub protocol: String,
    pub mint_a: String,
    pub mint_b: String,
    pub symbol_a: String,
    pub symbol_b: String,
    pub name_a: String,
    pub name_b: String,
    /// Réserves ramenées en unités humaines (brut / 10^décimales).
    pub reserve_a: f64,
    pub reserve_b: f64,
    pub fee_percent: Option<f64>,
    pub lp_token: LpToken,
    pub status: String,
    /// Absent quand le service de prix est injoignable ou muet.
    pub total_value_usd: Option<f64>,
}

/// Construit l'enregistrement unifié. Les deux lookups de métadonnées
/// partent de front ; leurs échecs, comme celui du prix, sont absorbés ici
/// (repli générique, valeur omise) et ne remontent jamais à l'appelant.
pub async fn normalize(
    pool: &Pool,
    reserves: &ResolvedReserves,
    health: &HealthReport,
    metadata: &dyn TokenMetadataService,
    pricing: &dyn PricingService,
) -> AdjustedPoolReserves {
    let (mint_a, mint_b) = pool.mints();

    let (display_a, display_b) = tokio::join!(
        metadata.fetch_symbol_and_name(&mint_a),
        metadata.fetch_symbol_and_name(&mint_b),
    );
    let display_a = display_a.unwrap_or_else(|e| {
        debug!(mint = %mint_a, error = %e, "token metadata unavailable, using fallback");
        TokenDisplay::fallback()
    });
    let display_b = display_b.unwrap_or_else(|e| {
        debug!(mint = %mint_b, error = %e, "token metadata unavailable, using fallback");
        TokenDisplay::fallback()
    });

    let reserve_a = scale(reserves.reserve_a, reserves.decimals_a);
    let reserve_b = scale(reserves.reserve_b, reserves.decimals_b);

    let total_value_usd = match pricing
        .price_in_usd(&display_a.symbol, reserve_a, &display_b.symbol, reserve_b)
        .await
    {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "price estimation unavailable, omitting value");
            None
        }
    };

    let lp_token = match pool.lp_token() {
        Some((mint, supply)) => LpToken::Mint { mint: mint.to_string(), supply },
        None => LpToken::NotApplicable,
    };

    AdjustedPoolReserves {
        address: pool.address().to_string(),
        protocol: pool.protocol().name().to_string(),
        mint_a: mint_a.to_string(),
        mint_b: mint_b.to_string(),
        symbol_a: display_a.symbol,
        symbol_b: display_b.symbol,
        name_a: display_a.name,
        name_b: display_b.name,
        reserve_a,
        reserve_b,
        fee_percent: pool.fee_as_percent(),
        lp_token,
        status: health.summary(),
        total_value_usd,
    }
}

/// Ramène un montant brut en unités humaines.
fn scale(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}
