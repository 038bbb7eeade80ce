// src/decoders/meteora/dlmm/pool.rs

use crate::decoders::field_reader::{self, FieldSpec};
use crate::decoders::layout::PoolLayout;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- CONSTANTES DU PROTOCOLE ---
pub const METEORA_DLMM_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo");
pub const LB_PAIR_DISCRIMINATOR: [u8; 8] = [33, 11, 49, 98, 181, 101, 177, 13];

// Le compte stocke le taux de base en cent-millièmes (2500 => 2.50 %).
const FEE_RATE_DENOMINATOR: f64 = 100_000.0;

// --- TABLE DES OFFSETS ---
// Miroir partiel du LbPair. La liquidité vit dans les BinArrays, pas ici :
// on approxime les réserves par les soldes des deux vaults.
pub mod onchain_layout {
    use super::*;

    pub const MIN_LEN: usize = 358;

    pub const BIN_STEP: FieldSpec = FieldSpec::u16("bin_step", 8);
    pub const ACTIVE_ID: FieldSpec = FieldSpec::i32("active_id", 10);
    pub const STATUS: FieldSpec = FieldSpec::u8("status", 14);
    pub const PAIR_TYPE: FieldSpec = FieldSpec::u8("pair_type", 15);
    pub const BASE_FEE_RATE: FieldSpec = FieldSpec::u64("base_fee_rate", 16);
    pub const TOKEN_X_MINT: FieldSpec = FieldSpec::pubkey("token_x_mint", 88);
    pub const TOKEN_Y_MINT: FieldSpec = FieldSpec::pubkey("token_y_mint", 120);
    pub const RESERVE_X: FieldSpec = FieldSpec::pubkey("reserve_x", 152);
    pub const RESERVE_Y: FieldSpec = FieldSpec::pubkey("reserve_y", 184);
    pub const ORACLE: FieldSpec = FieldSpec::pubkey("oracle", 216);

    pub const LAYOUT: PoolLayout = PoolLayout {
        protocol: "meteora_dlmm",
        min_len: MIN_LEN,
        fields: &[
            BIN_STEP, ACTIVE_ID, STATUS, PAIR_TYPE, BASE_FEE_RATE, TOKEN_X_MINT,
            TOKEN_Y_MINT, RESERVE_X, RESERVE_Y, ORACLE,
        ],
    };
}

// --- STRUCTURE DE SORTIE PROPRE ---
// Convention des côtés : A = token X, B = token Y.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedDlmmPool {
    pub address: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub oracle: Pubkey,
    pub active_bin_id: i32,
    pub bin_step: u16,
    pub base_fee_rate: u64,
    pub status: u8,
}

impl DecodedDlmmPool {
    pub fn fee_as_percent(&self) -> f64 {
        (self.base_fee_rate as f64 / FEE_RATE_DENOMINATOR) * 100.0
    }

    pub fn fee_bps(&self) -> u64 {
        self.base_fee_rate / 10
    }
}

/// Tente de décoder un compte LbPair Meteora DLMM.
pub fn decode_lb_pair(address: &Pubkey, data: &[u8]) -> Result<DecodedDlmmPool, ResolveError> {
    if data.len() < onchain_layout::MIN_LEN {
        return Err(ResolveError::AccountTooSmall {
            got: data.len(),
            min: onchain_layout::MIN_LEN,
        });
    }
    if data.get(..8) != Some(&LB_PAIR_DISCRIMINATOR) {
        return Err(ResolveError::Unsupported {
            reason: format!("invalid LbPair discriminator on account {}", address),
        });
    }

    Ok(DecodedDlmmPool {
        address: *address,
        mint_a: field_reader::read_pubkey(data, &onchain_layout::TOKEN_X_MINT)?,
        mint_b: field_reader::read_pubkey(data, &onchain_layout::TOKEN_Y_MINT)?,
        vault_a: field_reader::read_pubkey(data, &onchain_layout::RESERVE_X)?,
        vault_b: field_reader::read_pubkey(data, &onchain_layout::RESERVE_Y)?,
        oracle: field_reader::read_pubkey(data, &onchain_layout::ORACLE)?,
        active_bin_id: field_reader::read_i32_le(data, &onchain_layout::ACTIVE_ID)?,
        bin_step: field_reader::read_u16_le(data, &onchain_layout::BIN_STEP)?,
        base_fee_rate: field_reader::read_u64_le(data, &onchain_layout::BASE_FEE_RATE)?,
        status: field_reader::read_u8(data, &onchain_layout::STATUS)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account(len: usize) -> (Vec<u8>, Pubkey, Pubkey) {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();

        let mut data = vec![0u8; len];
        if len >= 8 {
            data[..8].copy_from_slice(&LB_PAIR_DISCRIMINATOR);
        }
        if len >= onchain_layout::MIN_LEN {
            data[onchain_layout::BIN_STEP.offset..onchain_layout::BIN_STEP.end()]
                .copy_from_slice(&25u16.to_le_bytes());
            data[onchain_layout::ACTIVE_ID.offset..onchain_layout::ACTIVE_ID.end()]
                .copy_from_slice(&(-421i32).to_le_bytes());
            data[onchain_layout::BASE_FEE_RATE.offset..onchain_layout::BASE_FEE_RATE.end()]
                .copy_from_slice(&2000u64.to_le_bytes());
            data[onchain_layout::TOKEN_X_MINT.offset..onchain_layout::TOKEN_X_MINT.end()]
                .copy_from_slice(mint_a.as_ref());
            data[onchain_layout::TOKEN_Y_MINT.offset..onchain_layout::TOKEN_Y_MINT.end()]
                .copy_from_slice(mint_b.as_ref());
            data[onchain_layout::RESERVE_X.offset..onchain_layout::RESERVE_X.end()]
                .copy_from_slice(Pubkey::new_unique().as_ref());
            data[onchain_layout::RESERVE_Y.offset..onchain_layout::RESERVE_Y.end()]
                .copy_from_slice(Pubkey::new_unique().as_ref());
        }
        (data, mint_a, mint_b)
    }

    #[test]
    fn layout_is_coherent() {
        onchain_layout::LAYOUT.validate().unwrap();
    }

    #[test]
    fn decodes_at_exactly_358_bytes() {
        let (data, mint_a, mint_b) = sample_account(onchain_layout::MIN_LEN);
        let pool = decode_lb_pair(&Pubkey::new_unique(), &data).unwrap();
        assert_eq!(pool.mint_a, mint_a);
        assert_eq!(pool.mint_b, mint_b);
        assert_eq!(pool.bin_step, 25);
        assert_eq!(pool.active_bin_id, -421);
        assert_eq!(pool.base_fee_rate, 2000);
    }

    #[test]
    fn rejects_at_357_bytes() {
        let (data, ..) = sample_account(onchain_layout::MIN_LEN - 1);
        assert!(matches!(
            decode_lb_pair(&Pubkey::new_unique(), &data).unwrap_err(),
            ResolveError::AccountTooSmall { got: 357, min: 358 }
        ));
    }
}
