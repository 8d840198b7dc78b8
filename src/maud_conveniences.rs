use maud::{Markup, Render, html};

pub const PRIMARY_BUTTON: &str = "bg-indigo-600 hover:bg-indigo-700 text-white font-semibold py-2 px-4 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500";
pub const SECONDARY_BUTTON: &str = "bg-white hover:bg-slate-100 text-slate-700 border border-slate-200 font-semibold py-2 px-4 rounded-lg";
pub const DANGER_BUTTON: &str = "bg-red-600 hover:bg-red-700 text-white font-semibold py-2 px-4 rounded-lg";

pub fn title(s: impl Render) -> Markup {
    html! {
        h2 class="text-lg font-semibold mb-4 text-slate-900" {(s)}
    }
}

pub fn form_element(id: &'static str, label: &'static str, input: Markup, error: Option<&str>) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-medium mb-1 text-slate-700" {(label)}
            (input)
            @if let Some(error) = error {
                p class="mt-1 text-sm text-red-600" {(error)}
            }
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    value: &str,
    placeholder: &'static str,
    error: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input type="text" id=(id) name=(id) value=(value) placeholder=(placeholder) required
                class="w-full h-10 px-3 rounded-lg border border-slate-200 bg-white text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500";
        },
        error,
    )
}

/// Overlay rendered into the `#modal` slot.
pub fn modal(heading: &str, body: Markup) -> Markup {
    html! {
        div class="fixed inset-0 z-40 flex items-center justify-center bg-slate-900/40" {
            div class="bg-white rounded-xl shadow-lg w-full max-w-md p-6" {
                (title(heading))
                (body)
            }
        }
    }
}

/// Out-of-band swap that empties the `#modal` slot.
pub fn close_modal_oob() -> Markup {
    html! {
        div id="modal" hx-swap-oob="true" {}
    }
}
