// src/error.rs

use thiserror::Error;

/// Taxonomie des erreurs du pipeline de résolution.
///
/// Les erreurs de décodage et de résolution sont fatales pour l'appel en cours.
/// Les échecs de métadonnées et de prix ne passent jamais par ici : ils sont
/// absorbés localement par le normaliseur (champs optionnels absents).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Le compte entier est plus court que le minimum déclaré du protocole.
    /// Aucun enregistrement partiel n'est produit.
    #[error("account too small: {got} bytes, expected >= {min}")]
    AccountTooSmall { got: usize, min: usize },

    /// Une lecture à offset fixe dépasse la fin du buffer.
    #[error("truncated read of `{field}` at offset {offset}: only {len} bytes available")]
    TruncatedField {
        field: &'static str,
        offset: usize,
        len: usize,
    },

    /// Le détecteur n'a reconnu aucun des cinq protocoles supportés.
    /// La raison embarque la longueur observée et le discriminateur.
    #[error("unsupported pool account: {reason}")]
    Unsupported { reason: String },

    /// Un collaborateur externe (ledger, vault, mint) a échoué.
    /// `stage` nomme l'étape du pipeline, `account` le compte fautif.
    #[error("{stage} failed for {account}: {message}")]
    Collaborator {
        stage: &'static str,
        account: String,
        message: String,
    },
}

impl ResolveError {
    /// Construit une erreur de collaborateur à partir de n'importe quelle
    /// erreur affichable (anyhow, client RPC...).
    pub fn collaborator(
        stage: &'static str,
        account: impl ToString,
        source: impl std::fmt::Display,
    ) -> Self {
        Self::Collaborator {
            stage,
            account: account.to_string(),
            message: source.to_string(),
        }
    }
}
