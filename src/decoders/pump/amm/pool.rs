// src/decoders/pump/amm/pool.rs

use crate::decoders::field_reader::{self, FieldSpec};
use crate::decoders::layout::PoolLayout;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- CONSTANTES DU PROTOCOLE ---
pub const PUMP_AMM_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");
pub const POOL_ACCOUNT_DISCRIMINATOR: [u8; 8] = [241, 154, 109, 4, 17, 177, 109, 188];

// Le compte stocke les frais en cent-millièmes (2500 => 2.50 %).
const FEE_RATE_DENOMINATOR: f64 = 100_000.0;

// --- TABLE DES OFFSETS ---
// Miroir du compte Pool du programme pump.fun AMM, champ par champ.
pub mod onchain_layout {
    use super::*;

    pub const MIN_LEN: usize = 214;

    pub const POOL_BUMP: FieldSpec = FieldSpec::u8("pool_bump", 8);
    pub const INDEX: FieldSpec = FieldSpec::u16("index", 9);
    pub const CREATOR: FieldSpec = FieldSpec::pubkey("creator", 11);
    pub const BASE_MINT: FieldSpec = FieldSpec::pubkey("base_mint", 43);
    pub const QUOTE_MINT: FieldSpec = FieldSpec::pubkey("quote_mint", 75);
    pub const LP_MINT: FieldSpec = FieldSpec::pubkey("lp_mint", 107);
    pub const BASE_VAULT: FieldSpec = FieldSpec::pubkey("base_vault", 139);
    pub const QUOTE_VAULT: FieldSpec = FieldSpec::pubkey("quote_vault", 171);
    pub const LP_SUPPLY: FieldSpec = FieldSpec::u64("lp_supply", 203);
    pub const STATUS: FieldSpec = FieldSpec::u8("status", 211);
    pub const FEE_RATE: FieldSpec = FieldSpec::u16("fee_rate", 212);

    pub const LAYOUT: PoolLayout = PoolLayout {
        protocol: "pump_amm",
        min_len: MIN_LEN,
        fields: &[
            POOL_BUMP, INDEX, CREATOR, BASE_MINT, QUOTE_MINT, LP_MINT, BASE_VAULT,
            QUOTE_VAULT, LP_SUPPLY, STATUS, FEE_RATE,
        ],
    };
}

// --- STRUCTURE DE SORTIE PROPRE ---
// Convention des côtés : A = base (le token lancé), B = quote (généralement SOL).
// Les réserves ne sont PAS dans le compte : elles vivent dans les deux vaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedPumpAmmPool {
    pub address: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    // Seul protocole de la maison à porter son LP directement dans le compte.
    pub lp_mint: Pubkey,
    pub lp_supply: u64,
    pub fee_rate: u16,
    pub status: u8,
}

impl DecodedPumpAmmPool {
    /// Frais de pool sous forme de pourcentage lisible.
    pub fn fee_as_percent(&self) -> f64 {
        (self.fee_rate as f64 / FEE_RATE_DENOMINATOR) * 100.0
    }

    /// Frais convertis en points de base, pour les contrôles de santé.
    pub fn fee_bps(&self) -> u64 {
        self.fee_rate as u64 / 10
    }
}

/// Tente de décoder les données brutes d'un compte Pool pump.fun AMM.
/// Lecture pure : aucun appel réseau, aucun enregistrement partiel.
pub fn decode_pool(address: &Pubkey, data: &[u8]) -> Result<DecodedPumpAmmPool, ResolveError> {
    if data.len() < onchain_layout::MIN_LEN {
        return Err(ResolveError::AccountTooSmall {
            got: data.len(),
            min: onchain_layout::MIN_LEN,
        });
    }
    if data.get(..8) != Some(&POOL_ACCOUNT_DISCRIMINATOR) {
        return Err(ResolveError::Unsupported {
            reason: format!("invalid pump.fun AMM discriminator on account {}", address),
        });
    }

    Ok(DecodedPumpAmmPool {
        address: *address,
        mint_a: field_reader::read_pubkey(data, &onchain_layout::BASE_MINT)?,
        mint_b: field_reader::read_pubkey(data, &onchain_layout::QUOTE_MINT)?,
        vault_a: field_reader::read_pubkey(data, &onchain_layout::BASE_VAULT)?,
        vault_b: field_reader::read_pubkey(data, &onchain_layout::QUOTE_VAULT)?,
        lp_mint: field_reader::read_pubkey(data, &onchain_layout::LP_MINT)?,
        lp_supply: field_reader::read_u64_le(data, &onchain_layout::LP_SUPPLY)?,
        fee_rate: field_reader::read_u16_le(data, &onchain_layout::FEE_RATE)?,
        status: field_reader::read_u8(data, &onchain_layout::STATUS)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account(fee_rate: u16) -> (Vec<u8>, Pubkey, Pubkey, Pubkey, Pubkey, Pubkey) {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        let vault_a = Pubkey::new_unique();
        let vault_b = Pubkey::new_unique();
        let lp_mint = Pubkey::new_unique();

        let mut data = vec![0u8; onchain_layout::MIN_LEN];
        data[..8].copy_from_slice(&POOL_ACCOUNT_DISCRIMINATOR);
        data[onchain_layout::BASE_MINT.offset..onchain_layout::BASE_MINT.end()]
            .copy_from_slice(mint_a.as_ref());
        data[onchain_layout::QUOTE_MINT.offset..onchain_layout::QUOTE_MINT.end()]
            .copy_from_slice(mint_b.as_ref());
        data[onchain_layout::LP_MINT.offset..onchain_layout::LP_MINT.end()]
            .copy_from_slice(lp_mint.as_ref());
        data[onchain_layout::BASE_VAULT.offset..onchain_layout::BASE_VAULT.end()]
            .copy_from_slice(vault_a.as_ref());
        data[onchain_layout::QUOTE_VAULT.offset..onchain_layout::QUOTE_VAULT.end()]
            .copy_from_slice(vault_b.as_ref());
        data[onchain_layout::LP_SUPPLY.offset..onchain_layout::LP_SUPPLY.end()]
            .copy_from_slice(&1_000_000u64.to_le_bytes());
        data[onchain_layout::FEE_RATE.offset..onchain_layout::FEE_RATE.end()]
            .copy_from_slice(&fee_rate.to_le_bytes());

        (data, mint_a, mint_b, vault_a, vault_b, lp_mint)
    }

    #[test]
    fn layout_is_coherent() {
        onchain_layout::LAYOUT.validate().unwrap();
    }

    #[test]
    fn decodes_a_214_byte_account() {
        let (data, mint_a, mint_b, vault_a, vault_b, lp_mint) = sample_account(2500);
        let address = Pubkey::new_unique();
        let pool = decode_pool(&address, &data).unwrap();

        assert_eq!(pool.mint_a, mint_a);
        assert_eq!(pool.mint_b, mint_b);
        assert_eq!(pool.vault_a, vault_a);
        assert_eq!(pool.vault_b, vault_b);
        assert_eq!(pool.lp_mint, lp_mint);
        assert_eq!(pool.lp_supply, 1_000_000);
    }

    #[test]
    fn fee_rate_2500_reads_as_two_and_a_half_percent() {
        let (data, ..) = sample_account(2500);
        let pool = decode_pool(&Pubkey::new_unique(), &data).unwrap();
        assert_eq!(pool.fee_rate, 2500);
        assert!((pool.fee_as_percent() - 2.50).abs() < f64::EPSILON);
        assert_eq!(pool.fee_bps(), 250);
    }

    #[test]
    fn rejects_account_below_minimum_length() {
        let (mut data, ..) = sample_account(2500);
        data.truncate(onchain_layout::MIN_LEN - 1);
        match decode_pool(&Pubkey::new_unique(), &data).unwrap_err() {
            ResolveError::AccountTooSmall { got, min } => {
                assert_eq!(got, 213);
                assert_eq!(min, 214);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_foreign_discriminator() {
        let (mut data, ..) = sample_account(2500);
        data[..8].copy_from_slice(&[9u8; 8]);
        assert!(matches!(
            decode_pool(&Pubkey::new_unique(), &data).unwrap_err(),
            ResolveError::Unsupported { .. }
        ));
    }
}
