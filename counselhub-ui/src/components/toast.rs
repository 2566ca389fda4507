//! Toast Notification Component
//!
//! Shows errors that outlive the action that caused them.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            {move || {
                state.error.get().map(|msg| view! { <ToastMessage message=msg /> })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-3 bg-red-600 text-white px-4 py-3 rounded-lg shadow-lg">
            <span class="text-lg">"✕"</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}

/// Inline alert for errors and confirmations that belong to one view
#[component]
pub fn Alert(
    #[prop(into)]
    message: String,
    #[prop(default = "error")]
    variant: &'static str,
) -> impl IntoView {
    let class = match variant {
        "success" => "bg-green-900/50 border-green-600 text-green-200",
        "info" => "bg-blue-900/50 border-blue-600 text-blue-200",
        _ => "bg-red-900/50 border-red-600 text-red-200",
    };

    view! {
        <div
            role="alert"
            class=format!("border rounded-lg px-4 py-3 mb-4 whitespace-pre-line {}", class)
        >
            {message}
        </div>
    }
}
