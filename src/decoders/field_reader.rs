// src/decoders/field_reader.rs

use crate::error::ResolveError;
use solana_sdk::pubkey::Pubkey;

/// Un champ nommé, à offset fixe, dans le layout binaire d'un compte.
/// Toutes les valeurs numériques sont en little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

impl FieldSpec {
    pub const fn pubkey(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 32 }
    }
    pub const fn u8(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 1 }
    }
    pub const fn u16(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 2 }
    }
    pub const fn u32(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 4 }
    }
    pub const fn i32(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 4 }
    }
    pub const fn u64(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 8 }
    }
    pub const fn u128(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 16 }
    }

    /// Premier octet situé après le champ.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Extrait la tranche exacte d'un champ, ou échoue en Truncated-Data si le
/// buffer est trop court.
fn slice<'a>(data: &'a [u8], field: &FieldSpec) -> Result<&'a [u8], ResolveError> {
    data.get(field.offset..field.offset + field.len)
        .ok_or(ResolveError::TruncatedField {
            field: field.name,
            offset: field.offset,
            len: data.len(),
        })
}

/// Lit une adresse de 32 octets et la ré-encode dans la forme canonique de
/// la plateforme (`Pubkey`, affichable en base58).
pub fn read_pubkey(data: &[u8], field: &FieldSpec) -> Result<Pubkey, ResolveError> {
    debug_assert_eq!(field.len, 32);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(slice(data, field)?);
    Ok(Pubkey::new_from_array(bytes))
}

pub fn read_u8(data: &[u8], field: &FieldSpec) -> Result<u8, ResolveError> {
    debug_assert_eq!(field.len, 1);
    Ok(slice(data, field)?[0])
}

pub fn read_u16_le(data: &[u8], field: &FieldSpec) -> Result<u16, ResolveError> {
    debug_assert_eq!(field.len, 2);
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(slice(data, field)?);
    Ok(u16::from_le_bytes(bytes))
}

pub fn read_u32_le(data: &[u8], field: &FieldSpec) -> Result<u32, ResolveError> {
    debug_assert_eq!(field.len, 4);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(slice(data, field)?);
    Ok(u32::from_le_bytes(bytes))
}

pub fn read_i32_le(data: &[u8], field: &FieldSpec) -> Result<i32, ResolveError> {
    debug_assert_eq!(field.len, 4);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(slice(data, field)?);
    Ok(i32::from_le_bytes(bytes))
}

pub fn read_u64_le(data: &[u8], field: &FieldSpec) -> Result<u64, ResolveError> {
    debug_assert_eq!(field.len, 8);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(slice(data, field)?);
    Ok(u64::from_le_bytes(bytes))
}

/// Lit un entier non signé de 128 bits assemblé depuis deux lectures de
/// 64 bits little-endian consécutives : les 8 premiers octets forment les
/// 64 bits de poids faible, les 8 suivants sont décalés de 64 bits à gauche.
/// Le type `u128` natif garantit qu'aucune précision n'est perdue.
pub fn read_u128_le(data: &[u8], field: &FieldSpec) -> Result<u128, ResolveError> {
    debug_assert_eq!(field.len, 16);
    let raw = slice(data, field)?;
    let mut low = [0u8; 8];
    let mut high = [0u8; 8];
    low.copy_from_slice(&raw[..8]);
    high.copy_from_slice(&raw[8..]);
    Ok((u64::from_le_bytes(low) as u128) | ((u64::from_le_bytes(high) as u128) << 64))
}
