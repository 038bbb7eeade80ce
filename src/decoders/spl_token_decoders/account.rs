// src/decoders/spl_token_decoders/account.rs

use anyhow::Result;
use solana_program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_token::state::Account as SplTokenAccount;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSplAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Décode les données brutes d'un compte de jeton SPL (un vault de pool).
/// Le solde `amount` est la réserve réelle du côté correspondant.
pub fn decode_account(data: &[u8]) -> Result<DecodedSplAccount> {
    let spl_account = SplTokenAccount::unpack(data)?;
    Ok(DecodedSplAccount {
        mint: Pubkey::new_from_array(spl_account.mint.to_bytes()),
        owner: Pubkey::new_from_array(spl_account.owner.to_bytes()),
        amount: spl_account.amount,
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Fabrique le contenu d'un compte de jeton SPL initialisé.
    /// Layout : mint[0..32], owner[32..64], amount[64..72], état à l'octet 108.
    pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; SplTokenAccount::LEN];
        data[..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1; // AccountState::Initialized
        data
    }

    #[test]
    fn decodes_amount_and_mint() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let data = token_account_data(&mint, &owner, 123_456_789);
        let decoded = decode_account(&data).unwrap();
        assert_eq!(decoded.mint, mint);
        assert_eq!(decoded.owner, owner);
        assert_eq!(decoded.amount, 123_456_789);
    }

    #[test]
    fn rejects_truncated_account() {
        assert!(decode_account(&[0u8; 64]).is_err());
    }
}
