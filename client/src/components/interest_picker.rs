//! Multi-select list of interests used by search, matching and creation forms.

#[cfg(test)]
#[path = "interest_picker_test.rs"]
mod interest_picker_test;

use leptos::prelude::*;

use crate::net::types::Interest;

/// Add `label` to `selected` or remove it when already present.
pub fn toggle_selection(selected: &mut Vec<String>, label: &str) {
    if let Some(pos) = selected.iter().position(|s| s == label) {
        selected.remove(pos);
    } else {
        selected.push(label.to_owned());
    }
}

/// Clickable interest chips. Selection is stored by label.
#[component]
pub fn InterestPicker(
    #[prop(into)] options: Signal<Vec<Interest>>,
    selected: RwSignal<Vec<String>>,
) -> impl IntoView {
    view! {
        <div class="interest-picker">
            {move || {
                let options = options.get();
                if options.is_empty() {
                    return view! { <span class="interest-picker__empty">"No interests available"</span> }
                        .into_any();
                }
                options
                    .into_iter()
                    .map(|interest| {
                        let label = interest.interest;
                        let is_selected = {
                            let label = label.clone();
                            move || selected.get().contains(&label)
                        };
                        let on_click = {
                            let label = label.clone();
                            move |ev: leptos::ev::MouseEvent| {
                                ev.prevent_default();
                                selected.update(|s| toggle_selection(s, &label));
                            }
                        };
                        view! {
                            <button
                                type="button"
                                class="chip"
                                class:chip--selected=is_selected
                                on:click=on_click
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
