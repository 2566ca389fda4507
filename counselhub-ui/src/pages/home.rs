//! Home Page
//!
//! Landing page with links to sign in or register.

use leptos::*;
use leptos_router::*;

use counselhub::routes::Route as AppRoute;

use crate::state::global::GlobalState;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex flex-col items-center justify-center min-h-[70vh] text-center">
            <h1 class="text-4xl font-bold mb-4 text-blue-400">
                "Welcome to Our Counseling Platform"
            </h1>
            <p class="text-lg text-gray-300 mb-8 max-w-2xl">
                "We provide professional counseling services to help you navigate life's challenges. \
                 Connect with experienced counselors and find the support you need."
            </p>

            {move || match state.session.get() {
                Some(session) => view! {
                    <A
                        href=session.role.home().path()
                        class="bg-blue-600 hover:bg-blue-700 font-bold py-2 px-6 rounded-lg transition-colors"
                    >
                        "Go to Dashboard"
                    </A>
                }.into_view(),
                None => view! {
                    <div class="flex space-x-4">
                        <A
                            href=AppRoute::Login.path()
                            class="bg-blue-600 hover:bg-blue-700 font-bold py-2 px-6 rounded-lg transition-colors"
                        >
                            "Login"
                        </A>
                        <A
                            href=AppRoute::Register.path()
                            class="bg-green-600 hover:bg-green-700 font-bold py-2 px-6 rounded-lg transition-colors"
                        >
                            "Register"
                        </A>
                    </div>
                }.into_view(),
            }}
        </div>
    }
}
