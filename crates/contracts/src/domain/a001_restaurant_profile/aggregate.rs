use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;
use crate::shared::document::{Document, DocumentError, DocumentKind};
use crate::shared::mask::only_digits;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestaurantProfileId(pub Uuid);

impl RestaurantProfileId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for RestaurantProfileId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::from_string(s).map(RestaurantProfileId::new)
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Restaurant profile as edited on the settings screen.
///
/// `document`, `phone` and `cep` may arrive masked from the form; call
/// [`RestaurantProfileDto::normalized`] before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfileDto {
    pub id: Option<String>,
    pub name: String,
    /// CPF or CNPJ of the owner.
    pub document: String,
    pub phone: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub city: String,
    /// Two-letter UF.
    pub state: String,
    pub delivery_fee_cents: i64,
    pub min_order_cents: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RestaurantProfileDto {
    pub fn profile_id(&self) -> Option<RestaurantProfileId> {
        self.id
            .as_deref()
            .and_then(|s| RestaurantProfileId::from_string(s).ok())
    }

    pub fn document_kind(&self) -> Option<DocumentKind> {
        DocumentKind::detect(&self.document)
    }

    /// Copy with masks removed and free text trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            document: only_digits(&self.document),
            phone: only_digits(&self.phone),
            cep: only_digits(&self.cep),
            street: self.street.trim().to_string(),
            number: self.number.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_uppercase(),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Nome do restaurante é obrigatório".into());
        }

        if self.document.trim().is_empty() {
            return Err("CPF ou CNPJ é obrigatório".into());
        }
        if let Err(e) = Document::parse(&self.document) {
            return Err(match (e, self.document_kind()) {
                (DocumentError::InvalidLength { .. }, _) => {
                    "Documento deve ter 11 dígitos (CPF) ou 14 dígitos (CNPJ)".to_string()
                }
                (_, Some(kind)) => format!("{} inválido", kind.label()),
                (_, None) => "Documento inválido".to_string(),
            });
        }

        if !self.phone.trim().is_empty() {
            let phone_len = only_digits(&self.phone).len();
            if phone_len != 10 && phone_len != 11 {
                return Err("Telefone deve ter 10 ou 11 dígitos com DDD".into());
            }
        }

        if !self.cep.trim().is_empty() && only_digits(&self.cep).len() != 8 {
            return Err("CEP deve ter 8 dígitos".into());
        }

        let state = self.state.trim();
        if !state.is_empty() && (state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic())) {
            return Err("UF deve ter 2 letras".into());
        }

        if self.delivery_fee_cents < 0 {
            return Err("Taxa de entrega não pode ser negativa".into());
        }
        if self.min_order_cents < 0 {
            return Err("Pedido mínimo não pode ser negativo".into());
        }

        Ok(())
    }
}
