// src/resolver.rs

use crate::decoders::{spl_token_decoders, Pool, ReserveSource};
use crate::error::ResolveError;
use crate::rpc::LedgerReader;
use serde::{Deserialize, Serialize};

/// Réserves résolues des deux côtés, avec la précision décimale de chaque
/// mint. Éphémère : recalculé à chaque requête, jamais mis en cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReserves {
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub decimals_a: u8,
    pub decimals_b: u8,
}

/// Produit les réserves résolues d'un pool décodé.
///
/// Protocoles à vaults : exactement quatre lectures indépendantes lancées de
/// front (solde du vault A, solde du vault B, décimales du mint A, décimales
/// du mint B) ; la tâche se suspend jusqu'à ce que les quatre aboutissent.
/// Un seul échec fait échouer toute la résolution, en nommant le compte
/// fautif. Aucun ré-essai à ce niveau.
///
/// Protocole auto-contenu (bonding curve) : aucun appel réseau, les
/// compteurs sortent du compte et les décimales sont des constantes.
pub async fn resolve_reserves(
    pool: &Pool,
    ledger: &dyn LedgerReader,
) -> Result<ResolvedReserves, ResolveError> {
    match pool.reserve_source() {
        ReserveSource::SelfContained {
            reserve_a,
            reserve_b,
            decimals_a,
            decimals_b,
        } => Ok(ResolvedReserves { reserve_a, reserve_b, decimals_a, decimals_b }),

        ReserveSource::Vaults { vault_a, vault_b } => {
            let (mint_a, mint_b) = pool.mints();

            let (vault_a_res, vault_b_res, mint_a_res, mint_b_res) = tokio::join!(
                ledger.fetch(&vault_a),
                ledger.fetch(&vault_b),
                ledger.fetch(&mint_a),
                ledger.fetch(&mint_b),
            );

            let vault_a_account = vault_a_res
                .map_err(|e| ResolveError::collaborator("vault balance lookup", vault_a, e))?;
            let reserve_a = spl_token_decoders::account::decode_account(&vault_a_account.data)
                .map_err(|e| ResolveError::collaborator("vault balance decode", vault_a, e))?
                .amount;

            let vault_b_account = vault_b_res
                .map_err(|e| ResolveError::collaborator("vault balance lookup", vault_b, e))?;
            let reserve_b = spl_token_decoders::account::decode_account(&vault_b_account.data)
                .map_err(|e| ResolveError::collaborator("vault balance decode", vault_b, e))?
                .amount;

            let mint_a_account = mint_a_res
                .map_err(|e| ResolveError::collaborator("mint decimals lookup", mint_a, e))?;
            let decimals_a = spl_token_decoders::mint::decode_mint(&mint_a, &mint_a_account.data)
                .map_err(|e| ResolveError::collaborator("mint decode", mint_a, e))?
                .decimals;

            let mint_b_account = mint_b_res
                .map_err(|e| ResolveError::collaborator("mint decimals lookup", mint_b, e))?;
            let decimals_b = spl_token_decoders::mint::decode_mint(&mint_b, &mint_b_account.data)
                .map_err(|e| ResolveError::collaborator("mint decode", mint_b, e))?
                .decimals;

            Ok(ResolvedReserves { reserve_a, reserve_b, decimals_a, decimals_b })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::pump;
    use crate::decoders::spl_token_decoders::account::tests::token_account_data;
    use crate::decoders::spl_token_decoders::mint::tests::mint_account_data;
    use crate::rpc::RawAccount;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use solana_sdk::pubkey::Pubkey;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Ledger en mémoire qui compte ses lectures et peut simuler la panne
    /// d'un compte précis.
    struct MockLedger {
        accounts: HashMap<Pubkey, Vec<u8>>,
        calls: AtomicUsize,
        failing: Option<Pubkey>,
    }

    impl MockLedger {
        fn new() -> Self {
            Self { accounts: HashMap::new(), calls: AtomicUsize::new(0), failing: None }
        }

        fn with(mut self, address: Pubkey, data: Vec<u8>) -> Self {
            self.accounts.insert(address, data);
            self
        }

        fn failing_on(mut self, address: Pubkey) -> Self {
            self.failing = Some(address);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LedgerReader for MockLedger {
        async fn fetch(&self, address: &Pubkey) -> Result<RawAccount> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing == Some(*address) {
                return Err(anyhow!("simulated outage"));
            }
            let data = self
                .accounts
                .get(address)
                .cloned()
                .ok_or_else(|| anyhow!("account not found: {address}"))?;
            Ok(RawAccount { pubkey: *address, data, owner: Pubkey::new_unique() })
        }
    }

    fn vault_based_pool() -> Pool {
        Pool::PumpAmm(Box::new(pump::amm::DecodedPumpAmmPool {
            address: Pubkey::new_unique(),
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            vault_a: Pubkey::new_unique(),
            vault_b: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            lp_supply: 42,
            fee_rate: 2500,
            status: 0,
        }))
    }

    #[tokio::test]
    async fn vault_based_resolution_issues_exactly_four_lookups() {
        let pool = vault_based_pool();
        let (mint_a, mint_b) = pool.mints();
        let (vault_a, vault_b) = match pool.reserve_source() {
            ReserveSource::Vaults { vault_a, vault_b } => (vault_a, vault_b),
            _ => unreachable!(),
        };

        let owner = Pubkey::new_unique();
        let ledger = MockLedger::new()
            .with(vault_a, token_account_data(&mint_a, &owner, 10_000))
            .with(vault_b, token_account_data(&mint_b, &owner, 777_000))
            .with(mint_a, mint_account_data(9))
            .with(mint_b, mint_account_data(6));

        let reserves = resolve_reserves(&pool, &ledger).await.unwrap();
        assert_eq!(ledger.calls(), 4);
        assert_eq!(
            reserves,
            ResolvedReserves { reserve_a: 10_000, reserve_b: 777_000, decimals_a: 9, decimals_b: 6 }
        );
    }

    #[tokio::test]
    async fn one_failing_vault_fails_the_whole_resolution() {
        let pool = vault_based_pool();
        let (mint_a, mint_b) = pool.mints();
        let (vault_a, vault_b) = match pool.reserve_source() {
            ReserveSource::Vaults { vault_a, vault_b } => (vault_a, vault_b),
            _ => unreachable!(),
        };

        let owner = Pubkey::new_unique();
        let ledger = MockLedger::new()
            .with(vault_a, token_account_data(&mint_a, &owner, 10_000))
            .with(mint_a, mint_account_data(9))
            .with(mint_b, mint_account_data(6))
            .failing_on(vault_b);

        let err = resolve_reserves(&pool, &ledger).await.unwrap_err();
        match err {
            ResolveError::Collaborator { stage, account, .. } => {
                assert_eq!(stage, "vault balance lookup");
                assert_eq!(account, vault_b.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
        // Les quatre lectures sont lancées de front avant le premier `?`.
        assert_eq!(ledger.calls(), 4);
    }

    #[tokio::test]
    async fn self_contained_pool_never_touches_the_ledger() {
        let pool = Pool::PumpBondingCurve(Box::new(
            pump::bonding_curve::DecodedBondingCurvePool {
                address: Pubkey::new_unique(),
                mint: Pubkey::new_unique(),
                virtual_token_reserves: 1,
                virtual_sol_reserves: 2,
                real_token_reserves: 200_000_000_000,
                real_sol_reserves: 5_000_000_000,
                token_total_supply: 0,
                complete: false,
            },
        ));

        let ledger = MockLedger::new();
        let reserves = resolve_reserves(&pool, &ledger).await.unwrap();
        assert_eq!(ledger.calls(), 0);
        assert_eq!(
            reserves,
            ResolvedReserves {
                reserve_a: 5_000_000_000,
                reserve_b: 200_000_000_000,
                decimals_a: 9,
                decimals_b: 6,
            }
        );
    }
}
