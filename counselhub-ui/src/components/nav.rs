//! Navigation Component
//!
//! Header bar with brand and session-dependent links.

use leptos::*;
use leptos_router::*;

use counselhub::routes::Route as AppRoute;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let on_logout = {
        let state = state.clone();
        move |_| {
            state.sign_out();
            navigate(&AppRoute::Login.path(), Default::default());
        }
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🧠"</span>
                        <span class="text-xl font-bold text-white">"CounselHub"</span>
                    </A>

                    {move || match state.session.get() {
                        Some(session) => view! {
                            <div class="flex items-center space-x-1">
                                <NavLink href=session.role.home().path() label="Dashboard" />
                                <NavLink href=AppRoute::MyAppointments.path() label="My Appointments" />
                                <span class="px-4 text-gray-400">
                                    {format!("Welcome, {}!", session.display_name())}
                                </span>
                                <button
                                    on:click=on_logout.clone()
                                    class="px-4 py-2 rounded-lg bg-red-600 hover:bg-red-700 transition-colors"
                                >
                                    "Logout"
                                </button>
                            </div>
                        }.into_view(),
                        None => view! {
                            <div class="flex items-center space-x-1">
                                <NavLink href=AppRoute::Login.path() label="Login" />
                                <NavLink href=AppRoute::Register.path() label="Register" />
                            </div>
                        }.into_view(),
                    }}
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(
    #[prop(into)]
    href: String,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
