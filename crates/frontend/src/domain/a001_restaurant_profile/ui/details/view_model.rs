use contracts::domain::a001_restaurant_profile::aggregate::RestaurantProfileDto;
use contracts::shared::document::{is_valid_cnpj, is_valid_cpf, CNPJ_LEN, CPF_LEN};
use contracts::shared::mask::{only_digits, parse_currency_cents};
use leptos::prelude::*;

use crate::domain::a001_restaurant_profile::api;
use crate::shared::alert::{self, AlertOptions};

/// Inline hint for the document field. Only complete numbers are judged,
/// so the message does not flicker while the user is typing.
pub fn document_hint(raw: &str) -> Option<String> {
    let digits = only_digits(raw);
    match digits.len() {
        0 => None,
        CPF_LEN if !is_valid_cpf(&digits) => Some("CPF inválido".to_string()),
        CNPJ_LEN if !is_valid_cnpj(&digits) => Some("CNPJ inválido".to_string()),
        n if n <= CNPJ_LEN => None,
        _ => Some("Documento deve ter 11 ou 14 dígitos".to_string()),
    }
}

/// Inline hint for the CEP field, shown once something was typed.
pub fn cep_hint(raw: &str) -> Option<String> {
    match only_digits(raw).len() {
        0 | 8 => None,
        _ => Some("CEP deve ter 8 dígitos".to_string()),
    }
}

/// Cents typed into a masked money field; empty means zero.
pub fn cents_from_input(raw: &str) -> i64 {
    parse_currency_cents(raw).unwrap_or(0)
}

/// ViewModel for the restaurant profile form
#[derive(Clone, Copy)]
pub struct RestaurantProfileViewModel {
    pub form: RwSignal<RestaurantProfileDto>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl RestaurantProfileViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(RestaurantProfileDto::default()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    pub fn document_error(&self) -> Option<String> {
        self.form.with(|f| document_hint(&f.document))
    }

    pub fn cep_error(&self) -> Option<String> {
        self.form.with(|f| cep_hint(&f.cep))
    }

    /// Load the saved profile; a restaurant without one keeps the empty form.
    pub fn load(&self) {
        let vm = *self;
        vm.loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_profile().await {
                Ok(Some(profile)) => vm.form.set(profile),
                Ok(None) => log::info!("restaurant profile not created yet"),
                Err(e) => {
                    log::error!("Failed to load restaurant profile: {}", e);
                    alert::error("Erro ao carregar perfil", e);
                }
            }
            vm.loading.set(false);
        });
    }

    pub fn save_command(&self) {
        if self.saving.get_untracked() {
            return;
        }

        let current = self.form.get_untracked().normalized();
        if let Err(msg) = current.validate() {
            alert::error("Verifique os dados", msg);
            return;
        }

        let vm = *self;
        vm.saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::save_profile(&current).await {
                Ok(saved) => {
                    vm.form.set(saved);
                    alert::success(
                        "Perfil salvo",
                        "As alterações já aparecem para os clientes",
                    );
                }
                Err(e) => {
                    log::error!("Failed to save restaurant profile: {}", e);
                    alert::error(
                        "Falha ao salvar",
                        (
                            e,
                            AlertOptions::new()
                                .sticky()
                                .action("Tentar novamente", move || vm.save_command()),
                        ),
                    );
                }
            }
            vm.saving.set(false);
        });
    }
}

impl Default for RestaurantProfileViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_hint_waits_for_complete_number() {
        assert_eq!(document_hint(""), None);
        assert_eq!(document_hint("111.444"), None);
        assert_eq!(document_hint("111.444.777-35"), None);
        assert_eq!(document_hint("111.444.777-36"), Some("CPF inválido".to_string()));
        assert_eq!(document_hint("11.444.777/0001"), None);
        assert_eq!(document_hint("11.444.777/0001-61"), None);
        assert_eq!(document_hint("11.444.777/0001-60"), Some("CNPJ inválido".to_string()));
        assert!(document_hint("114447770001610").is_some());
    }

    #[test]
    fn test_cep_hint() {
        assert_eq!(cep_hint(""), None);
        assert_eq!(cep_hint("01310-100"), None);
        assert!(cep_hint("0131").is_some());
    }

    #[test]
    fn test_cents_from_input() {
        assert_eq!(cents_from_input("5,99"), 599);
        assert_eq!(cents_from_input(""), 0);
        assert_eq!(cents_from_input("1.250,00"), 125000);
    }
}
