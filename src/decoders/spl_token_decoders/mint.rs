// src/decoders/spl_token_decoders/mint.rs

use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{
    extension::StateWithExtensions,
    state::Mint,
};

// --- STRUCTURE DE SORTIE PROPRE ---
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMint {
    pub address: Pubkey,
    pub decimals: u8,
}

/// Décode les données brutes d'un compte de mint (SPL Token ou Token-2022)
/// et en extrait la précision décimale. `StateWithExtensions` sait lire à la
/// fois les anciens mints et ceux qui portent des extensions.
pub fn decode_mint(address: &Pubkey, data: &[u8]) -> Result<DecodedMint> {
    let mint_state = StateWithExtensions::<Mint>::unpack(data)?;
    Ok(DecodedMint {
        address: *address,
        decimals: mint_state.base.decimals,
    })
}
