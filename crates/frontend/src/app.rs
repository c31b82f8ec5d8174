use crate::domain::a001_restaurant_profile::ui::details::RestaurantProfileDetails;
use crate::shared::alert::AlertProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <AlertProvider>
                <RestaurantProfileDetails />
            </AlertProvider>
        </ConfigProvider>
    }
}
