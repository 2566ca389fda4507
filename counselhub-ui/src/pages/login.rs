//! Login Page

use leptos::*;
use leptos_router::*;

use counselhub::error::LOGIN_FAILED;
use counselhub::routes::Route as AppRoute;
use counselhub::session::Session;
use counselhub::validation::validate_login;

use crate::api;
use crate::components::{Alert, InlineLoading};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let mounted = use_mounted();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let request = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.message().to_string()));
                return;
            }
        };

        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api::login(&request).await;
            if !mounted.get() {
                return;
            }
            match result {
                Ok(resp) => {
                    let session = Session::from_auth(resp, None);
                    let home = session.role.home();
                    state.sign_in(session);
                    navigate(&home.path(), Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Login failed: {}", e).into());
                    set_error.set(Some(e.user_message(LOGIN_FAILED)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex justify-center py-12">
            <div class="w-full max-w-md bg-gray-800 rounded-lg shadow-lg p-8">
                <h2 class="text-2xl font-bold text-center mb-6">"Login"</h2>

                {move || error.get().map(|msg| view! { <Alert message=msg /> })}

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label for="email" class="block text-sm text-gray-400 mb-1">"Email:"</label>
                        <input
                            type="email"
                            id="email"
                            required
                            class="w-full bg-gray-700 rounded-lg px-3 py-2"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm text-gray-400 mb-1">"Password:"</label>
                        <input
                            type="password"
                            id="password"
                            required
                            class="w-full bg-gray-700 rounded-lg px-3 py-2"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600
                               disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                               transition-colors flex items-center justify-center space-x-2"
                    >
                        {move || submitting.get().then(|| view! { <InlineLoading /> })}
                        <span>"Login"</span>
                    </button>
                </form>

                <p class="mt-6 text-center text-gray-400">
                    "Don't have an account? "
                    <A href=AppRoute::Register.path() class="text-blue-400 hover:underline">"Register"</A>
                </p>
            </div>
        </div>
    }
}
