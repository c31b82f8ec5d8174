use super::view_model::{cents_from_input, RestaurantProfileViewModel};
use crate::shared::components::ui::{Input, MaskedInput};
use contracts::domain::a001_restaurant_profile::aggregate::RestaurantProfileDto;
use contracts::shared::mask::{
    format_cep, format_currency, format_document, format_phone, mask_currency,
};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn RestaurantProfileDetails() -> impl IntoView {
    let vm = RestaurantProfileViewModel::new();
    vm.load();

    // Read-only view of one form field.
    let field = move |get: fn(&RestaurantProfileDto) -> String| Signal::derive(move || vm.form.with(get));

    view! {
        <div class="details-container restaurant-profile">
            <div class="details-header">
                <h3>"Perfil do restaurante"</h3>
                <Show when=move || vm.loading.get()>
                    <Spinner />
                </Show>
            </div>

            <div class="details-form">
                <Input
                    id="name"
                    label="Nome"
                    value=field(|f| f.name.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.name = v))
                    placeholder="Nome exibido para os clientes"
                    required=true
                />

                <MaskedInput
                    id="document"
                    label="CPF / CNPJ"
                    value=field(|f| f.document.clone())
                    mask=format_document
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.document = v))
                    placeholder="000.000.000-00 ou 00.000.000/0000-00"
                    error=Signal::derive(move || vm.document_error())
                />

                <MaskedInput
                    id="phone"
                    label="Telefone"
                    value=field(|f| f.phone.clone())
                    mask=format_phone
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.phone = v))
                    placeholder="(00) 00000-0000"
                    inputmode="tel"
                />

                <MaskedInput
                    id="cep"
                    label="CEP"
                    value=field(|f| f.cep.clone())
                    mask=format_cep
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.cep = v))
                    placeholder="00000-000"
                    error=Signal::derive(move || vm.cep_error())
                />

                <Input
                    id="street"
                    label="Endereço"
                    value=field(|f| f.street.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.street = v))
                />

                <Input
                    id="number"
                    label="Número"
                    value=field(|f| f.number.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.number = v))
                    maxlength=10
                />

                <Input
                    id="city"
                    label="Cidade"
                    value=field(|f| f.city.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.city = v))
                />

                <Input
                    id="state"
                    label="UF"
                    value=field(|f| f.state.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.state = v.to_uppercase()))
                    maxlength=2
                />

                <MaskedInput
                    id="delivery_fee"
                    label="Taxa de entrega (R$)"
                    value=field(|f| format_currency(f.delivery_fee_cents))
                    mask=mask_currency
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.delivery_fee_cents = cents_from_input(&v))
                    })
                />

                <MaskedInput
                    id="min_order"
                    label="Pedido mínimo (R$)"
                    value=field(|f| format_currency(f.min_order_cents))
                    mask=mask_currency
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.min_order_cents = cents_from_input(&v))
                    })
                />
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.saving.get() || !vm.is_form_valid())
                    on_click=move |_| vm.save_command()
                >
                    {move || if vm.saving.get() { "Salvando..." } else { "Salvar" }}
                </Button>
            </div>
        </div>
    }
}
