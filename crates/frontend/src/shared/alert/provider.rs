use leptos::prelude::*;
use thaw::*;

use super::state::AlertState;

/// Renders the app-wide alert dialog and feeds it from the alert manager.
///
/// Must be mounted exactly once, around the rest of the app.
#[component]
pub fn AlertProvider(children: Children) -> impl IntoView {
    let state = RwSignal::new(AlertState::default());
    let open = RwSignal::new(false);

    super::register_display_handler(move |next| state.set(next));
    on_cleanup(super::unregister_display_handler);

    Effect::new(move |_| {
        let is_open = state.with(|s| s.open);
        if open.get_untracked() != is_open {
            open.set(is_open);
        }
    });

    // Closed by the dialog itself (mask click, Escape): run the dismiss flow.
    Effect::new(move |_| {
        if !open.get() && state.with_untracked(|s| s.open) {
            super::dismiss();
        }
    });

    let surface_class = move || {
        state.with(|s| format!("alert-dialog alert-dialog--{}", s.variant.as_str()))
    };

    view! {
        {children()}

        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{move || state.with(|s| s.title.clone())}</DialogTitle>
                    <DialogContent>
                        <div class=surface_class>
                            {move || {
                                state
                                    .with(|s| s.description.clone())
                                    .map(|d| view! { <p class="alert-dialog__description">{d}</p> })
                            }}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        {move || {
                            state
                                .with(|s| s.action_label.clone())
                                .map(|label| {
                                    view! {
                                        <Button
                                            appearance=ButtonAppearance::Primary
                                            on_click=move |_| {
                                                super::run_action();
                                            }
                                        >
                                            {label}
                                        </Button>
                                    }
                                })
                        }}
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                super::dismiss();
                            }
                        >
                            "Fechar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
