// src/decoders/layout.rs

use super::field_reader::FieldSpec;

/// Descripteur de layout d'un protocole : la longueur minimale déclarée du
/// compte et la table des champs nommés que le décodeur lit.
///
/// Les tables d'offsets ne sont pas des littéraux de confiance éparpillés :
/// chaque protocole expose son descripteur, validé une fois par ses tests
/// (pas de chevauchement, champs contenus dans la longueur déclarée).
pub struct PoolLayout {
    pub protocol: &'static str,
    pub min_len: usize,
    pub fields: &'static [FieldSpec],
}

impl PoolLayout {
    /// Vérifie la cohérence interne du descripteur.
    pub fn validate(&self) -> Result<(), String> {
        let mut sorted: Vec<&FieldSpec> = self.fields.iter().collect();
        sorted.sort_by_key(|f| f.offset);

        for pair in sorted.windows(2) {
            if pair[0].end() > pair[1].offset {
                return Err(format!(
                    "{}: field `{}` [{}..{}] overlaps `{}` at offset {}",
                    self.protocol,
                    pair[0].name,
                    pair[0].offset,
                    pair[0].end(),
                    pair[1].name,
                    pair[1].offset,
                ));
            }
        }

        if let Some(last) = sorted.last() {
            if last.end() > self.min_len {
                return Err(format!(
                    "{}: field `{}` ends at {} beyond declared minimum length {}",
                    self.protocol,
                    last.name,
                    last.end(),
                    self.min_len,
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_overlapping_fields() {
        const FIELDS: [FieldSpec; 2] = [
            FieldSpec::u64("a", 0),
            FieldSpec::u64("b", 4),
        ];
        let layout = PoolLayout { protocol: "test", min_len: 64, fields: &FIELDS };
        assert!(layout.validate().unwrap_err().contains("overlaps"));
    }

    #[test]
    fn detects_field_beyond_minimum_length() {
        const FIELDS: [FieldSpec; 1] = [FieldSpec::pubkey("mint", 8)];
        let layout = PoolLayout { protocol: "test", min_len: 16, fields: &FIELDS };
        assert!(layout.validate().unwrap_err().contains("beyond"));
    }

    #[test]
    fn accepts_sparse_non_overlapping_layout() {
        const FIELDS: [FieldSpec; 3] = [
            FieldSpec::u8("bump", 8),
            FieldSpec::pubkey("mint", 16),
            FieldSpec::u128("liquidity", 64),
        ];
        let layout = PoolLayout { protocol: "test", min_len: 100, fields: &FIELDS };
        layout.validate().unwrap();
    }
}
