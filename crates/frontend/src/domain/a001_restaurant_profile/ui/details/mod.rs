//! Restaurant profile settings screen
//!
//! - view_model.rs: form state, load/save commands, field checks
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::RestaurantProfileDetails;
pub use view_model::RestaurantProfileViewModel;
