// src/decoders/orca/whirlpool/pool.rs

use crate::decoders::field_reader::{self, FieldSpec};
use crate::decoders::layout::PoolLayout;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- CONSTANTES DU PROTOCOLE ---
pub const ORCA_WHIRLPOOL_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");
pub const WHIRLPOOL_DISCRIMINATOR: [u8; 8] = [63, 149, 209, 12, 225, 128, 99, 9];

// Orca stocke les frais en centièmes de point de base (fraction sur 10^6).
const FEE_RATE_DENOMINATOR: f64 = 1_000_000.0;

// --- TABLE DES OFFSETS ---
pub mod onchain_layout {
    use super::*;

    pub const MIN_LEN: usize = 245;

    pub const WHIRLPOOLS_CONFIG: FieldSpec = FieldSpec::pubkey("whirlpools_config", 8);
    pub const WHIRLPOOL_BUMP: FieldSpec = FieldSpec::u8("whirlpool_bump", 40);
    pub const TICK_SPACING: FieldSpec = FieldSpec::u16("tick_spacing", 41);
    pub const FEE_TIER_INDEX: FieldSpec = FieldSpec::u16("fee_tier_index", 43);
    pub const FEE_RATE: FieldSpec = FieldSpec::u16("fee_rate", 45);
    pub const PROTOCOL_FEE_RATE: FieldSpec = FieldSpec::u16("protocol_fee_rate", 47);
    pub const LIQUIDITY: FieldSpec = FieldSpec::u128("liquidity", 49);
    pub const SQRT_PRICE: FieldSpec = FieldSpec::u128("sqrt_price", 65);
    pub const TICK_CURRENT: FieldSpec = FieldSpec::i32("tick_current", 81);
    pub const TOKEN_MINT_A: FieldSpec = FieldSpec::pubkey("token_mint_a", 101);
    pub const TOKEN_VAULT_A: FieldSpec = FieldSpec::pubkey("token_vault_a", 133);
    pub const TOKEN_MINT_B: FieldSpec = FieldSpec::pubkey("token_mint_b", 181);
    pub const TOKEN_VAULT_B: FieldSpec = FieldSpec::pubkey("token_vault_b", 213);

    pub const LAYOUT: PoolLayout = PoolLayout {
        protocol: "orca_whirlpool",
        min_len: MIN_LEN,
        fields: &[
            WHIRLPOOLS_CONFIG, WHIRLPOOL_BUMP, TICK_SPACING, FEE_TIER_INDEX,
            FEE_RATE, PROTOCOL_FEE_RATE, LIQUIDITY, SQRT_PRICE, TICK_CURRENT,
            TOKEN_MINT_A, TOKEN_VAULT_A, TOKEN_MINT_B, TOKEN_VAULT_B,
        ],
    };
}

// --- STRUCTURE DE SORTIE PROPRE ---
// Convention des côtés : A = token A, B = token B (noms natifs d'Orca).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedWhirlpoolPool {
    pub address: Pubkey,
    pub whirlpools_config: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
}

impl DecodedWhirlpoolPool {
    pub fn fee_as_percent(&self) -> f64 {
        (self.fee_rate as f64 / FEE_RATE_DENOMINATOR) * 100.0
    }

    pub fn fee_bps(&self) -> u64 {
        self.fee_rate as u64 / 100
    }
}

/// Tente de décoder un compte Whirlpool Orca.
pub fn decode_pool(address: &Pubkey, data: &[u8]) -> Result<DecodedWhirlpoolPool, ResolveError> {
    if data.len() < onchain_layout::MIN_LEN {
        return Err(ResolveError::AccountTooSmall {
            got: data.len(),
            min: onchain_layout::MIN_LEN,
        });
    }
    if data.get(..8) != Some(&WHIRLPOOL_DISCRIMINATOR) {
        return Err(ResolveError::Unsupported {
            reason: format!("invalid Whirlpool discriminator on account {}", address),
        });
    }

    Ok(DecodedWhirlpoolPool {
        address: *address,
        whirlpools_config: field_reader::read_pubkey(data, &onchain_layout::WHIRLPOOLS_CONFIG)?,
        mint_a: field_reader::read_pubkey(data, &onchain_layout::TOKEN_MINT_A)?,
        mint_b: field_reader::read_pubkey(data, &onchain_layout::TOKEN_MINT_B)?,
        vault_a: field_reader::read_pubkey(data, &onchain_layout::TOKEN_VAULT_A)?,
        vault_b: field_reader::read_pubkey(data, &onchain_layout::TOKEN_VAULT_B)?,
        liquidity: field_reader::read_u128_le(data, &onchain_layout::LIQUIDITY)?,
        sqrt_price: field_reader::read_u128_le(data, &onchain_layout::SQRT_PRICE)?,
        tick_current_index: field_reader::read_i32_le(data, &onchain_layout::TICK_CURRENT)?,
        tick_spacing: field_reader::read_u16_le(data, &onchain_layout::TICK_SPACING)?,
        fee_rate: field_reader::read_u16_le(data, &onchain_layout::FEE_RATE)?,
        protocol_fee_rate: field_reader::read_u16_le(data, &onchain_layout::PROTOCOL_FEE_RATE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> (Vec<u8>, Pubkey, Pubkey, Pubkey, Pubkey) {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        let vault_a = Pubkey::new_unique();
        let vault_b = Pubkey::new_unique();

        let mut data = vec![0u8; onchain_layout::MIN_LEN];
        data[..8].copy_from_slice(&WHIRLPOOL_DISCRIMINATOR);
        data[onchain_layout::TICK_SPACING.offset..onchain_layout::TICK_SPACING.end()]
            .copy_from_slice(&64u16.to_le_bytes());
        data[onchain_layout::FEE_RATE.offset..onchain_layout::FEE_RATE.end()]
            .copy_from_slice(&3000u16.to_le_bytes());
        data[onchain_layout::LIQUIDITY.offset..onchain_layout::LIQUIDITY.offset + 8]
            .copy_from_slice(&777u64.to_le_bytes());
        data[onchain_layout::TOKEN_MINT_A.offset..onchain_layout::TOKEN_MINT_A.end()]
            .copy_from_slice(mint_a.as_ref());
        data[onchain_layout::TOKEN_VAULT_A.offset..onchain_layout::TOKEN_VAULT_A.end()]
            .copy_from_slice(vault_a.as_ref());
        data[onchain_layout::TOKEN_MINT_B.offset..onchain_layout::TOKEN_MINT_B.end()]
            .copy_from_slice(mint_b.as_ref());
        data[onchain_layout::TOKEN_VAULT_B.offset..onchain_layout::TOKEN_VAULT_B.end()]
            .copy_from_slice(vault_b.as_ref());

        (data, mint_a, mint_b, vault_a, vault_b)
    }

    #[test]
    fn layout_is_coherent() {
        onchain_layout::LAYOUT.validate().unwrap();
    }

    #[test]
    fn decodes_a_245_byte_account() {
        let (data, mint_a, mint_b, vault_a, vault_b) = sample_account();
        let pool = decode_pool(&Pubkey::new_unique(), &data).unwrap();
        assert_eq!(pool.mint_a, mint_a);
        assert_eq!(pool.mint_b, mint_b);
        assert_eq!(pool.vault_a, vault_a);
        assert_eq!(pool.vault_b, vault_b);
        assert_eq!(pool.liquidity, 777);
        // 3000 sur 10^6 : 0.30 %, soit 30 points de base.
        assert!((pool.fee_as_percent() - 0.30).abs() < 1e-12);
        assert_eq!(pool.fee_bps(), 30);
    }

    #[test]
    fn rejects_account_below_minimum_length() {
        let (mut data, ..) = sample_account();
        data.truncate(onchain_layout::MIN_LEN - 1);
        assert!(matches!(
            decode_pool(&Pubkey::new_unique(), &data).unwrap_err(),
            ResolveError::AccountTooSmall { got: 244, min: 245 }
        ));
    }
}
