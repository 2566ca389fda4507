//! Logout Page
//!
//! Clears the session on mount and returns to the login page shortly after.

use leptos::*;
use leptos_router::*;

use counselhub::routes::Route as AppRoute;

use crate::state::global::GlobalState;

/// Delay before the redirect to the login page
const REDIRECT_DELAY_MS: u32 = 1500;

#[component]
pub fn Logout() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    state.sign_out();

    let timer = gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
        navigate(&AppRoute::Login.path(), Default::default());
    });
    // Dropping a gloo Timeout cancels it
    on_cleanup(move || drop(timer));

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh]">
            <div class="bg-gray-800 shadow-lg p-6 rounded-2xl text-center">
                <h1 class="text-xl font-semibold">"Logging out..."</h1>
                <p class="text-gray-400 mt-2">
                    "Please wait while we redirect you to the login page."
                </p>
                <div class="loading-spinner w-6 h-6 mx-auto mt-4" />
            </div>
        </div>
    }
}
