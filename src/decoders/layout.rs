// src/decoders/layout.rs

use crate::error::LayoutError;
use bytemuck::Pod;
use std::mem::size_of;

/// Contrat commun des layouts à taille fixe.
///
/// Un layout est une struct `#[repr(C, packed)]` qui est le miroir exact des
/// octets du compte : les champs sont lus à un offset et une largeur fixes,
/// dans l'ordre de déclaration, sans padding implicite. Le décodage est pur et
/// l'encodage reproduit les octets d'origine.
pub trait AccountLayout: Pod {
    /// Nom lisible du layout, utilisé dans les messages d'erreur.
    const NAME: &'static str;

    /// Taille exacte (en octets) exigée par le layout.
    const SPAN: usize = size_of::<Self>();

    /// Décode un buffer dont la taille doit être exactement `SPAN`.
    fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        if data.len() != Self::SPAN {
            return Err(LayoutError::MalformedAccount {
                layout: Self::NAME,
                expected: Self::SPAN,
                actual: data.len(),
            });
        }
        // Copie : aucun alignement n'est supposé sur le buffer source.
        Ok(bytemuck::pod_read_unaligned(data))
    }

    fn encode(&self) -> Vec<u8> {
        bytemuck::bytes_of(self).to_vec()
    }
}
