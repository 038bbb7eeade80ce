// src/decoders/mod.rs

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// --- 1. Déclarer tous nos modules principaux ---
pub mod detector;
pub mod field_reader;
pub mod layout;
pub mod meteora;
pub mod orca;
pub mod pool_factory;
pub mod pump;
pub mod raydium;
pub mod spl_token_decoders;

// --- 2. Ré-exporter les points d'entrée ---
pub use detector::{detect, Confidence, Detection, ProtocolKind};
pub use pool_factory::PoolFactory;

/// Le mint du SOL natif (wrapped SOL). Côté A implicite de la bonding curve,
/// jamais lu dans un buffer.
pub const NATIVE_SOL_MINT: Pubkey =
    solana_sdk::pubkey!("So11111111111111111111111111111111111111112");

// --- 3. L'union fermée des cinq familles supportées ---
// Le tag de protocole rend le dispatch exhaustif : le résolveur et le
// normaliseur matchent sur l'enum, jamais sur des champs non typés.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Pool {
    PumpAmm(Box<pump::amm::DecodedPumpAmmPool>),
    RaydiumClmm(Box<raydium::clmm::DecodedClmmPool>),
    MeteoraDlmm(Box<meteora::dlmm::DecodedDlmmPool>),
    PumpBondingCurve(Box<pump::bonding_curve::DecodedBondingCurvePool>),
    OrcaWhirlpool(Box<orca::whirlpool::DecodedWhirlpoolPool>),
}

/// D'où viennent les réserves d'un pool : des soldes de deux vaults externes,
/// ou de compteurs embarqués dans le compte lui-même (décimales fixées par
/// le protocole, aucun lookup nécessaire).
#[derive(Debug, Clone, Copy)]
pub enum ReserveSource {
    Vaults {
        vault_a: Pubkey,
        vault_b: Pubkey,
    },
    SelfContained {
        reserve_a: u64,
        reserve_b: u64,
        decimals_a: u8,
        decimals_b: u8,
    },
}

impl Pool {
    pub fn address(&self) -> Pubkey {
        match self {
            Pool::PumpAmm(p) => p.address,
            Pool::RaydiumClmm(p) => p.address,
            Pool::MeteoraDlmm(p) => p.address,
            Pool::PumpBondingCurve(p) => p.address,
            Pool::OrcaWhirlpool(p) => p.address,
        }
    }

    pub fn protocol(&self) -> ProtocolKind {
        match self {
            Pool::PumpAmm(_) => ProtocolKind::PumpAmm,
            Pool::RaydiumClmm(_) => ProtocolKind::RaydiumClmm,
            Pool::MeteoraDlmm(_) => ProtocolKind::MeteoraDlmm,
            Pool::PumpBondingCurve(_) => ProtocolKind::PumpBondingCurve,
            Pool::OrcaWhirlpool(_) => ProtocolKind::OrcaWhirlpool,
        }
    }

    /// Les deux mints sous la convention A/B, fixe par protocole.
    pub fn mints(&self) -> (Pubkey, Pubkey) {
        match self {
            Pool::PumpAmm(p) => (p.mint_a, p.mint_b),
            Pool::RaydiumClmm(p) => (p.mint_a, p.mint_b),
            Pool::MeteoraDlmm(p) => (p.mint_a, p.mint_b),
            Pool::PumpBondingCurve(p) => p.mints(),
            Pool::OrcaWhirlpool(p) => (p.mint_a, p.mint_b),
        }
    }

    pub fn reserve_source(&self) -> ReserveSource {
        match self {
            Pool::PumpAmm(p) => ReserveSource::Vaults { vault_a: p.vault_a, vault_b: p.vault_b },
            Pool::RaydiumClmm(p) => ReserveSource::Vaults { vault_a: p.vault_a, vault_b: p.vault_b },
            Pool::MeteoraDlmm(p) => ReserveSource::Vaults { vault_a: p.vault_a, vault_b: p.vault_b },
            Pool::PumpBondingCurve(p) => ReserveSource::SelfContained {
                // Réserves réelles, jamais les virtuelles.
                reserve_a: p.real_sol_reserves,
                reserve_b: p.real_token_reserves,
                decimals_a: pump::bonding_curve::SOL_DECIMALS,
                decimals_b: pump::bonding_curve::TOKEN_DECIMALS,
            },
            Pool::OrcaWhirlpool(p) => ReserveSource::Vaults { vault_a: p.vault_a, vault_b: p.vault_b },
        }
    }

    /// Frais de pool en pourcentage lisible, pour les protocoles qui les
    /// portent dans leur compte.
    pub fn fee_as_percent(&self) -> Option<f64> {
        match self {
            Pool::PumpAmm(p) => Some(p.fee_as_percent()),
            Pool::RaydiumClmm(_) => None,
            Pool::MeteoraDlmm(p) => Some(p.fee_as_percent()),
            Pool::PumpBondingCurve(_) => None,
            Pool::OrcaWhirlpool(p) => Some(p.fee_as_percent()),
        }
    }

    /// Frais en points de base, même disponibilité que `fee_as_percent`.
    pub fn fee_bps(&self) -> Option<u64> {
        match self {
            Pool::PumpAmm(p) => Some(p.fee_bps()),
            Pool::RaydiumClmm(_) => None,
            Pool::MeteoraDlmm(p) => Some(p.fee_bps()),
            Pool::PumpBondingCurve(_) => None,
            Pool::OrcaWhirlpool(p) => Some(p.fee_bps()),
        }
    }

    /// Magnitude de liquidité embarquée, quand le protocole en publie une.
    pub fn liquidity(&self) -> Option<u128> {
        match self {
            Pool::PumpAmm(_) => None,
            Pool::RaydiumClmm(p) => Some(p.liquidity),
            Pool::MeteoraDlmm(_) => None,
            Pool::PumpBondingCurve(_) => None,
            Pool::OrcaWhirlpool(p) => Some(p.liquidity),
        }
    }

    /// Mint et supply du token LP. Seul le pump.fun AMM les porte.
    pub fn lp_token(&self) -> Option<(Pubkey, u64)> {
        match self {
            Pool::PumpAmm(p) => Some((p.lp_mint, p.lp_supply)),
            _ => None,
        }
    }
}
