// src/tokens.rs

use crate::decoders::spl_token_decoders;
use crate::rpc::LedgerReader;
use anyhow::{Context, Result};
use async_trait::async_trait;
use borsh::BorshDeserialize;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

// Repli quand le compte de métadonnées manque ou ne se décode pas.
pub const FALLBACK_SYMBOL: &str = "TOKEN";
pub const FALLBACK_NAME: &str = "Unknown Token";
pub const FALLBACK_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDisplay {
    pub symbol: String,
    pub name: String,
}

impl TokenDisplay {
    pub fn fallback() -> Self {
        Self {
            symbol: FALLBACK_SYMBOL.to_string(),
            name: FALLBACK_NAME.to_string(),
        }
    }
}

/// Le "contrat" du service de métadonnées de tokens. L'appelant applique
/// lui-même le repli : un échec ici n'est jamais fatal pour le pipeline.
#[async_trait]
pub trait TokenMetadataService: Send + Sync {
    async fn fetch_decimals(&self, mint: &Pubkey) -> Result<u8>;
    async fn fetch_symbol_and_name(&self, mint: &Pubkey) -> Result<TokenDisplay>;
}

pub const METADATA_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// Implémentation adossée aux comptes de métadonnées Metaplex, lus via le
/// lecteur de ledger.
pub struct MetaplexMetadataService {
    ledger: Arc<dyn LedgerReader>,
}

// Préfixe borsh du compte Metadata. Les champs qui suivent (uri, fees...)
// ne nous intéressent pas et restent non lus.
#[derive(BorshDeserialize)]
#[allow(dead_code)]
struct MetadataPrefix {
    key: u8,
    update_authority: [u8; 32],
    mint: [u8; 32],
    name: String,
    symbol: String,
}

impl MetaplexMetadataService {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    /// Dérive la PDA du compte de métadonnées d'un mint.
    pub fn metadata_address(mint: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(
            &[b"metadata", METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
            &METADATA_PROGRAM_ID,
        )
        .0
    }
}

#[async_trait]
impl TokenMetadataService for MetaplexMetadataService {
    async fn fetch_decimals(&self, mint: &Pubkey) -> Result<u8> {
        let account = self.ledger.fetch(mint).await?;
        Ok(spl_token_decoders::mint::decode_mint(mint, &account.data)?.decimals)
    }

    async fn fetch_symbol_and_name(&self, mint: &Pubkey) -> Result<TokenDisplay> {
        let metadata_address = Self::metadata_address(mint);
        let account = self.ledger.fetch(&metadata_address).await?;
        let prefix = MetadataPrefix::deserialize(&mut account.data.as_slice())
            .context("metadata account is not borsh-decodable")?;
        // Metaplex remplit les chaînes à longueur fixe avec des '\0'.
        Ok(TokenDisplay {
            symbol: prefix.symbol.trim_end_matches('\0').to_string(),
            name: prefix.name.trim_end_matches('\0').to_string(),
        })
    }
}
