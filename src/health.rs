// src/health.rs

use crate::decoders::Pool;
use crate::resolver::ResolvedReserves;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict partagé par les cinq juges protocolaires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

/// Un problème détecté, dans l'ordre où les règles l'ont relevé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthIssue {
    ZeroReserveA,
    ZeroReserveB,
    ZeroLiquidity,
    UnusualFeeRate(u64),
    Migrated,
}

impl fmt::Display for HealthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthIssue::ZeroReserveA => write!(f, "zero reserve on side A"),
            HealthIssue::ZeroReserveB => write!(f, "zero reserve on side B"),
            HealthIssue::ZeroLiquidity => write!(f, "zero liquidity"),
            HealthIssue::UnusualFeeRate(bps) => write!(f, "unusual fee rate: {bps} bps"),
            HealthIssue::Migrated => write!(f, "migrated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub issues: Vec<HealthIssue>,
}

impl HealthReport {
    /// Texte de statut pour l'enregistrement unifié.
    pub fn summary(&self) -> String {
        match self.status {
            HealthStatus::Healthy if self.issues.is_empty() => "healthy".to_string(),
            HealthStatus::Healthy => format!("healthy ({})", self.join_issues()),
            HealthStatus::Warning => format!("warning: {}", self.join_issues()),
            HealthStatus::Critical => format!("critical: {}", self.join_issues()),
        }
    }

    fn join_issues(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Diagnostic de santé : un juge par protocole, même forme de verdict.
/// Déterministe : 0 problème => Healthy, 1 => Warning, >= 2 => Critical,
/// avec l'exception explicite de la courbe migrée.
pub fn assess(pool: &Pool, reserves: &ResolvedReserves) -> HealthReport {
    let mut issues = reserve_issues(reserves);

    match pool {
        Pool::PumpAmm(p) => {
            issues.extend(fee_issue(p.fee_bps()));
        }
        Pool::RaydiumClmm(p) => {
            if p.liquidity == 0 {
                issues.push(HealthIssue::ZeroLiquidity);
            }
        }
        Pool::MeteoraDlmm(p) => {
            issues.extend(fee_issue(p.fee_bps()));
        }
        Pool::PumpBondingCurve(p) => {
            if p.complete {
                issues.push(HealthIssue::Migrated);
            }
        }
        Pool::OrcaWhirlpool(p) => {
            if p.liquidity == 0 {
                issues.push(HealthIssue::ZeroLiquidity);
            }
            issues.extend(fee_issue(p.fee_bps()));
        }
    }

    let status = classify(pool, &issues);
    HealthReport { status, issues }
}

fn reserve_issues(reserves: &ResolvedReserves) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    if reserves.reserve_a == 0 {
        issues.push(HealthIssue::ZeroReserveA);
    }
    if reserves.reserve_b == 0 {
        issues.push(HealthIssue::ZeroReserveB);
    }
    issues
}

/// Des frais hors de [1, 10000] points de base sont suspects.
fn fee_issue(bps: u64) -> Option<HealthIssue> {
    if (1..=10_000).contains(&bps) {
        None
    } else {
        Some(HealthIssue::UnusualFeeRate(bps))
    }
}

fn classify(pool: &Pool, issues: &[HealthIssue]) -> HealthStatus {
    // Une courbe terminée n'est pas malade : seule, la migration ne
    // déclasse pas le verdict.
    if matches!(pool, Pool::PumpBondingCurve(_))
        && issues.len() == 1
        && issues[0] == HealthIssue::Migrated
    {
        return HealthStatus::Healthy;
    }
    match issues.len() {
        0 => HealthStatus::Healthy,
        1 => HealthStatus::Warning,
        _ => HealthStatus::Critical,
    }
}
