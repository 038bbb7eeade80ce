// src/rpc/mod.rs

pub mod resilient_client;
pub use resilient_client::ResilientRpcClient;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

/// Instantané brut d'un compte on-chain, tel que fourni par le lecteur de ledger.
/// Immuable une fois produit ; durée de vie : la requête en cours.
#[derive(Debug, Clone)]
pub struct RawAccount {
    pub pubkey: Pubkey,
    pub data: Vec<u8>,
    pub owner: Pubkey,
}

impl RawAccount {
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }
}

/// Le "contrat" du lecteur de ledger : la seule porte d'entrée vers les bytes
/// bruts de la blockchain. Les timeouts et ré-essais sont son affaire, pas
/// celle du pipeline.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Récupère un compte complet. Échoue avec "account not found" si le
    /// compte n'existe pas.
    async fn fetch(&self, address: &Pubkey) -> Result<RawAccount>;
}
