// src/decoders/raydium/clmm/pool.rs

use crate::decoders::field_reader::{self, FieldSpec};
use crate::decoders::layout::PoolLayout;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- CONSTANTES DU PROTOCOLE ---
pub const RAYDIUM_CLMM_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK");
pub const POOL_STATE_DISCRIMINATOR: [u8; 8] = [247, 237, 227, 245, 215, 195, 222, 70];

// --- TABLE DES OFFSETS ---
// Miroir partiel du PoolState Raydium CLMM. Les frais ne sont PAS dans ce
// compte (ils vivent dans l'AmmConfig), on ne les lit donc pas.
pub mod onchain_layout {
    use super::*;

    // Les comptes PoolState font plus de 1000 octets ; tout ce qu'on lit
    // tient largement sous cette borne.
    pub const MIN_LEN: usize = 800;

    pub const BUMP: FieldSpec = FieldSpec::u8("bump", 8);
    pub const AMM_CONFIG: FieldSpec = FieldSpec::pubkey("amm_config", 9);
    pub const OWNER: FieldSpec = FieldSpec::pubkey("owner", 41);
    pub const TOKEN_MINT_0: FieldSpec = FieldSpec::pubkey("token_mint_0", 73);
    pub const TOKEN_MINT_1: FieldSpec = FieldSpec::pubkey("token_mint_1", 105);
    pub const TOKEN_VAULT_0: FieldSpec = FieldSpec::pubkey("token_vault_0", 137);
    pub const TOKEN_VAULT_1: FieldSpec = FieldSpec::pubkey("token_vault_1", 169);
    pub const OBSERVATION_KEY: FieldSpec = FieldSpec::pubkey("observation_key", 201);
    pub const MINT_DECIMALS_0: FieldSpec = FieldSpec::u8("mint_decimals_0", 233);
    pub const MINT_DECIMALS_1: FieldSpec = FieldSpec::u8("mint_decimals_1", 234);
    pub const TICK_SPACING: FieldSpec = FieldSpec::u16("tick_spacing", 235);
    pub const LIQUIDITY: FieldSpec = FieldSpec::u128("liquidity", 237);
    pub const SQRT_PRICE_X64: FieldSpec = FieldSpec::u128("sqrt_price_x64", 253);
    pub const TICK_CURRENT: FieldSpec = FieldSpec::i32("tick_current", 269);

    pub const LAYOUT: PoolLayout = PoolLayout {
        protocol: "raydium_clmm",
        min_len: MIN_LEN,
        fields: &[
            BUMP, AMM_CONFIG, OWNER, TOKEN_MINT_0, TOKEN_MINT_1, TOKEN_VAULT_0,
            TOKEN_VAULT_1, OBSERVATION_KEY, MINT_DECIMALS_0, MINT_DECIMALS_1,
            TICK_SPACING, LIQUIDITY, SQRT_PRICE_X64, TICK_CURRENT,
        ],
    };
}

// --- STRUCTURE DE SORTIE PROPRE ---
// Convention des côtés : A = token 0, B = token 1. Les réserves vivent dans
// les deux vaults ; la liquidité concentrée est approximée par leurs soldes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedClmmPool {
    pub address: Pubkey,
    pub amm_config: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub liquidity: u128,
    pub sqrt_price_x64: u128,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
}

/// Tente de décoder un compte PoolState Raydium CLMM.
pub fn decode_pool(address: &Pubkey, data: &[u8]) -> Result<DecodedClmmPool, ResolveError> {
    if data.len() < onchain_layout::MIN_LEN {
        return Err(ResolveError::AccountTooSmall {
            got: data.len(),
            min: onchain_layout::MIN_LEN,
        });
    }
    if data.get(..8) != Some(&POOL_STATE_DISCRIMINATOR) {
        return Err(ResolveError::Unsupported {
            reason: format!("invalid PoolState discriminator on account {}", address),
        });
    }

    Ok(DecodedClmmPool {
        address: *address,
        amm_config: field_reader::read_pubkey(data, &onchain_layout::AMM_CONFIG)?,
        mint_a: field_reader::read_pubkey(data, &onchain_layout::TOKEN_MINT_0)?,
        mint_b: field_reader::read_pubkey(data, &onchain_layout::TOKEN_MINT_1)?,
        vault_a: field_reader::read_pubkey(data, &onchain_layout::TOKEN_VAULT_0)?,
        vault_b: field_reader::read_pubkey(data, &onchain_layout::TOKEN_VAULT_1)?,
        liquidity: field_reader::read_u128_le(data, &onchain_layout::LIQUIDITY)?,
        sqrt_price_x64: field_reader::read_u128_le(data, &onchain_layout::SQRT_PRICE_X64)?,
        tick_current_index: field_reader::read_i32_le(data, &onchain_layout::TICK_CURRENT)?,
        tick_spacing: field_reader::read_u16_le(data, &onchain_layout::TICK_SPACING)?,
    })
}
