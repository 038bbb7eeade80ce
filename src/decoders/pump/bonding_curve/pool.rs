// src/decoders/pump/bonding_curve/pool.rs

use crate::decoders::field_reader::{self, FieldSpec};
use crate::decoders::layout::PoolLayout;
use crate::decoders::NATIVE_SOL_MINT;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- CONSTANTES DU PROTOCOLE ---
pub const PUMP_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");
pub const BONDING_CURVE_DISCRIMINATOR: [u8; 8] = [23, 151, 24, 158, 101, 110, 149, 108];

/// SOL a toujours 9 décimales ; les tokens lancés sur la courbe en ont 6
/// par convention du programme. Aucun lookup externe n'est nécessaire.
pub const SOL_DECIMALS: u8 = 9;
pub const TOKEN_DECIMALS: u8 = 6;

// --- TABLE DES OFFSETS ---
// La courbe est auto-contenue : les compteurs de réserves vivent dans le
// compte lui-même, il n'y a pas de vaults.
pub mod onchain_layout {
    use super::*;

    /// Minimum dur : discriminateur + mint. En dessous, le compte est rejeté.
    pub const HARD_MIN_LEN: usize = 40;
    /// Fin de la région des compteurs. Entre HARD_MIN_LEN et cette borne,
    /// le décodeur dégrade au lieu d'échouer.
    pub const FULL_LEN: usize = 81;

    pub const MINT: FieldSpec = FieldSpec::pubkey("mint", 8);
    pub const VIRTUAL_TOKEN_RESERVES: FieldSpec = FieldSpec::u64("virtual_token_reserves", 40);
    pub const VIRTUAL_SOL_RESERVES: FieldSpec = FieldSpec::u64("virtual_sol_reserves", 48);
    pub const REAL_TOKEN_RESERVES: FieldSpec = FieldSpec::u64("real_token_reserves", 56);
    pub const REAL_SOL_RESERVES: FieldSpec = FieldSpec::u64("real_sol_reserves", 64);
    pub const TOKEN_TOTAL_SUPPLY: FieldSpec = FieldSpec::u64("token_total_supply", 72);
    pub const COMPLETE: FieldSpec = FieldSpec::u8("complete", 80);

    pub const LAYOUT: PoolLayout = PoolLayout {
        protocol: "pump_bonding_curve",
        min_len: FULL_LEN,
        fields: &[
            MINT,
            VIRTUAL_TOKEN_RESERVES,
            VIRTUAL_SOL_RESERVES,
            REAL_TOKEN_RESERVES,
            REAL_SOL_RESERVES,
            TOKEN_TOTAL_SUPPLY,
            COMPLETE,
        ],
    };
}

// --- STRUCTURE DE SORTIE PROPRE ---
// Convention des côtés : A = SOL natif (implicite, jamais lu dans le buffer),
// B = le token lancé, dont le mint est lu dans le compte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedBondingCurvePool {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    /// Courbe terminée : le token a migré vers un pool AMM.
    pub complete: bool,
}

impl DecodedBondingCurvePool {
    /// Les deux mints sous la convention A/B.
    pub fn mints(&self) -> (Pubkey, Pubkey) {
        (NATIVE_SOL_MINT, self.mint)
    }
}

/// Tente de décoder un compte BondingCurve pump.fun.
///
/// Deux régimes d'échec distincts : un compte plus court que le minimum dur
/// est rejeté sans enregistrement partiel ; un compte dont seul le
/// sous-bloc des compteurs est illisible (instantané tronqué dont le
/// discriminateur correspond pourtant) dégrade en réserves nulles et
/// `complete = false`, et le traitement continue.
pub fn decode_pool(address: &Pubkey, data: &[u8]) -> Result<DecodedBondingCurvePool, ResolveError> {
    if data.len() < onchain_layout::HARD_MIN_LEN {
        return Err(ResolveError::AccountTooSmall {
            got: data.len(),
            min: onchain_layout::HARD_MIN_LEN,
        });
    }
    if data.get(..8) != Some(&BONDING_CURVE_DISCRIMINATOR) {
        return Err(ResolveError::Unsupported {
            reason: format!("invalid bonding curve discriminator on account {}", address),
        });
    }

    let mint = field_reader::read_pubkey(data, &onchain_layout::MINT)?;

    if data.len() < onchain_layout::FULL_LEN {
        // Dégradation douce : le mint est exploitable, pas les compteurs.
        return Ok(DecodedBondingCurvePool {
            address: *address,
            mint,
            virtual_token_reserves: 0,
            virtual_sol_reserves: 0,
            real_token_reserves: 0,
            real_sol_reserves: 0,
            token_total_supply: 0,
            complete: false,
        });
    }

    Ok(DecodedBondingCurvePool {
        address: *address,
        mint,
        virtual_token_reserves: field_reader::read_u64_le(data, &onchain_layout::VIRTUAL_TOKEN_RESERVES)?,
        virtual_sol_reserves: field_reader::read_u64_le(data, &onchain_layout::VIRTUAL_SOL_RESERVES)?,
        real_token_reserves: field_reader::read_u64_le(data, &onchain_layout::REAL_TOKEN_RESERVES)?,
        real_sol_reserves: field_reader::read_u64_le(data, &onchain_layout::REAL_SOL_RESERVES)?,
        token_total_supply: field_reader::read_u64_le(data, &onchain_layout::TOKEN_TOTAL_SUPPLY)?,
        complete: field_reader::read_u8(data, &onchain_layout::COMPLETE)? != 0,
    })
}
