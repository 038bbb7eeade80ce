// src/decoders/detector.rs

use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::{meteora, orca, pump, raydium};

/// Tag de protocole de l'union fermée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolKind {
    PumpAmm,
    RaydiumClmm,
    MeteoraDlmm,
    PumpBondingCurve,
    OrcaWhirlpool,
}

impl ProtocolKind {
    /// Ordre de priorité fixe du détecteur ; le premier qui matche gagne.
    pub const ALL: [ProtocolKind; 5] = [
        ProtocolKind::PumpAmm,
        ProtocolKind::RaydiumClmm,
        ProtocolKind::MeteoraDlmm,
        ProtocolKind::PumpBondingCurve,
        ProtocolKind::OrcaWhirlpool,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProtocolKind::PumpAmm => "pump_amm",
            ProtocolKind::RaydiumClmm => "raydium_clmm",
            ProtocolKind::MeteoraDlmm => "meteora_dlmm",
            ProtocolKind::PumpBondingCurve => "pump_bonding_curve",
            ProtocolKind::OrcaWhirlpool => "orca_whirlpool",
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            ProtocolKind::PumpAmm => pump::amm::PUMP_AMM_PROGRAM_ID,
            ProtocolKind::RaydiumClmm => raydium::clmm::RAYDIUM_CLMM_PROGRAM_ID,
            ProtocolKind::MeteoraDlmm => meteora::dlmm::METEORA_DLMM_PROGRAM_ID,
            ProtocolKind::PumpBondingCurve => pump::bonding_curve::PUMP_PROGRAM_ID,
            ProtocolKind::OrcaWhirlpool => orca::whirlpool::ORCA_WHIRLPOOL_PROGRAM_ID,
        }
    }
}

/// Niveau de confiance de la classification : la correspondance exacte du
/// programme propriétaire prime toujours sur l'empreinte heuristique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Exact,
    Fingerprint,
}

#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub kind: ProtocolKind,
    pub confidence: Confidence,
}

// --- EMPREINTES ---
// Discriminateur à l'offset 0 + plage de longueurs plausibles du compte.
struct Fingerprint {
    kind: ProtocolKind,
    discriminator: [u8; 8],
    min_len: usize,
    max_len: usize,
}

const FINGERPRINTS: [Fingerprint; 5] = [
    Fingerprint {
        kind: ProtocolKind::PumpAmm,
        discriminator: pump::amm::POOL_ACCOUNT_DISCRIMINATOR,
        min_len: pump::amm::onchain_layout::MIN_LEN,
        max_len: 1024,
    },
    Fingerprint {
        kind: ProtocolKind::RaydiumClmm,
        discriminator: raydium::clmm::POOL_STATE_DISCRIMINATOR,
        min_len: raydium::clmm::onchain_layout::MIN_LEN,
        max_len: 4096,
    },
    Fingerprint {
        kind: ProtocolKind::MeteoraDlmm,
        discriminator: meteora::dlmm::LB_PAIR_DISCRIMINATOR,
        min_len: meteora::dlmm::onchain_layout::MIN_LEN,
        max_len: 2048,
    },
    Fingerprint {
        kind: ProtocolKind::PumpBondingCurve,
        discriminator: pump::bonding_curve::BONDING_CURVE_DISCRIMINATOR,
        min_len: pump::bonding_curve::onchain_layout::HARD_MIN_LEN,
        max_len: 512,
    },
    Fingerprint {
        kind: ProtocolKind::OrcaWhirlpool,
        discriminator: orca::whirlpool::WHIRLPOOL_DISCRIMINATOR,
        min_len: orca::whirlpool::onchain_layout::MIN_LEN,
        max_len: 1024,
    },
];

/// Classifie un compte brut. Pur et sans effet de bord : aucune donnée
/// supplémentaire n'est jamais récupérée ici.
///
/// Priorité : (1) programme propriétaire connu ; (2) empreinte
/// discriminateur + plage de longueur, dans l'ordre fixe de `ALL` ;
/// (3) sinon, erreur Unsupported avec le diagnostic observé.
pub fn detect(data: &[u8], owner: &Pubkey) -> Result<Detection, ResolveError> {
    for kind in ProtocolKind::ALL {
        if *owner == kind.program_id() {
            return Ok(Detection { kind, confidence: Confidence::Exact });
        }
    }

    if data.len() >= 8 {
        for fingerprint in &FINGERPRINTS {
            if data[..8] == fingerprint.discriminator
                && (fingerprint.min_len..=fingerprint.max_len).contains(&data.len())
            {
                return Ok(Detection {
                    kind: fingerprint.kind,
                    confidence: Confidence::Fingerprint,
                });
            }
        }
    }

    let discriminator = hex::encode(&data[..data.len().min(8)]);
    Err(ResolveError::Unsupported {
        reason: format!(
            "owner {}, length {} bytes, discriminator 0x{}",
            owner,
            data.len(),
            discriminator
        ),
    })
}
