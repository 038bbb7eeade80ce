// src/decoders/pool_factory.rs

use super::{detect, meteora, orca, pump, raydium, Confidence, Pool};
use crate::error::ResolveError;
use crate::health;
use crate::normalizer::{self, AdjustedPoolReserves};
use crate::pricing::PricingService;
use crate::resolver;
use crate::rpc::LedgerReader;
use crate::tokens::TokenMetadataService;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::ProtocolKind;

/// La PoolFactory orchestre la chaîne complète de résolution et centralise
/// le mappage entre protocoles détectés et bons décodeurs.
///
/// Chaque résolution est une tâche indépendante : pas d'état partagé, pas
/// de cache, pas de verrou. Une résolution va au bout ou échoue.
#[derive(Clone)]
pub struct PoolFactory {
    ledger: Arc<dyn LedgerReader>,
    metadata: Arc<dyn TokenMetadataService>,
    pricing: Arc<dyn PricingService>,
}

impl PoolFactory {
    pub fn new(
        ledger: Arc<dyn LedgerReader>,
        metadata: Arc<dyn TokenMetadataService>,
        pricing: Arc<dyn PricingService>,
    ) -> Self {
        Self { ledger, metadata, pricing }
    }

    /// Point d'entrée public du pipeline : adresse -> enregistrement unifié.
    ///
    /// Étapes strictement ordonnées : fetch, détection, décodage, résolution
    /// des réserves, diagnostic de santé, normalisation. Les erreurs de
    /// décodage et de résolution annulent tout l'appel ; seuls les échecs
    /// de métadonnées/prix sont absorbés en aval.
    pub async fn resolve_pool(
        &self,
        address: &Pubkey,
    ) -> Result<AdjustedPoolReserves, ResolveError> {
        let started = Instant::now();

        let account = self
            .ledger
            .fetch(address)
            .await
            .map_err(|e| ResolveError::collaborator("account fetch", address, e))?;

        let stage = Instant::now();
        let pool = Self::decode_raw_pool(address, &account.data, &account.owner)?;
        let protocol = pool.protocol().name();
        debug!(
            stage = "decode",
            protocol,
            bytes = account.byte_length(),
            duration_ms = stage.elapsed().as_millis() as u64,
            "pool account decoded"
        );

        let stage = Instant::now();
        let reserves = resolver::resolve_reserves(&pool, self.ledger.as_ref()).await?;
        debug!(
            stage = "resolve",
            protocol,
            duration_ms = stage.elapsed().as_millis() as u64,
            "reserves resolved"
        );

        let stage = Instant::now();
        let report = health::assess(&pool, &reserves);
        debug!(
            stage = "assess",
            protocol,
            status = ?report.status,
            issues = report.issues.len(),
            duration_ms = stage.elapsed().as_millis() as u64,
            "health assessed"
        );

        let stage = Instant::now();
        let record = normalizer::normalize(
            &pool,
            &reserves,
            &report,
            self.metadata.as_ref(),
            self.pricing.as_ref(),
        )
        .await;
        debug!(
            stage = "normalize",
            protocol,
            duration_ms = stage.elapsed().as_millis() as u64,
            "record normalized"
        );

        info!(
            pool = %address,
            protocol,
            total_ms = started.elapsed().as_millis() as u64,
            "pool resolved"
        );
        Ok(record)
    }

    /// Décodage pur, sans réseau : détection puis dispatch vers le décodeur
    /// de la famille reconnue.
    pub fn decode_raw_pool(
        address: &Pubkey,
        data: &[u8],
        owner: &Pubkey,
    ) -> Result<Pool, ResolveError> {
        let detection = detect(data, owner)?;
        if detection.confidence == Confidence::Fingerprint {
            debug!(
                protocol = detection.kind.name(),
                "owner program unknown, classified by fingerprint"
            );
        }

        match detection.kind {
            ProtocolKind::PumpAmm => {
                pump::amm::decode_pool(address, data).map(|p| Pool::PumpAmm(Box::new(p)))
            }
            ProtocolKind::RaydiumClmm => {
                raydium::clmm::decode_pool(address, data).map(|p| Pool::RaydiumClmm(Box::new(p)))
            }
            ProtocolKind::MeteoraDlmm => meteora::dlmm::decode_lb_pair(address, data)
                .map(|p| Pool::MeteoraDlmm(Box::new(p))),
            ProtocolKind::PumpBondingCurve => pump::bonding_curve::decode_pool(address, data)
                .map(|p| Pool::PumpBondingCurve(Box::new(p))),
            ProtocolKind::OrcaWhirlpool => {
                orca::whirlpool::decode_pool(address, data).map(|p| Pool::OrcaWhirlpool(Box::new(p)))
            }
        }
    }

    /// Résout plusieurs pools de front, chaque adresse portant son propre
    /// résultat. Les résolutions ne partagent aucun état mutable.
    pub async fn resolve_pools(
        &self,
        addresses: &[Pubkey],
    ) -> Vec<(Pubkey, Result<AdjustedPoolReserves, ResolveError>)> {
        let mut set = tokio::task::JoinSet::new();
        for (index, address) in addresses.iter().enumerate() {
            let factory = self.clone();
            let address = *address;
            set.spawn(async move { (index, address, factory.resolve_pool(&address).await) });
        }

        let mut results: Vec<Option<(Pubkey, Result<AdjustedPoolReserves, ResolveError>)>> =
            (0..addresses.len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            if let Ok((index, address, result)) = joined {
                results[index] = Some((address, result));
            }
        }
        results.into_iter().flatten().collect()
    }
}
