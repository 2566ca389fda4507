//! Registration Page
//!
//! The role select toggles between counselor fields (specialization, session
//! rate) and client fields (preferences).

use leptos::*;
use leptos_router::*;

use counselhub::error::REGISTRATION_FAILED;
use counselhub::models::Role;
use counselhub::routes::Route as AppRoute;
use counselhub::session::Session;
use counselhub::validation::{validate_registration, RegistrationForm};

use crate::api;
use crate::components::{Alert, InlineLoading};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let mounted = use_mounted();

    let form = create_rw_signal(RegistrationForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let role = create_memo(move |_| form.with(|f| f.role));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let input = form.get_untracked();
        let request = match validate_registration(&input) {
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
            let result = api::register(&request).await;
            if !mounted.get() {
                return;
            }
            match result {
                Ok(resp) => {
                    let session = Session::from_auth(resp, Some(input.username.trim()));
                    let home = session.role.home();
                    state.sign_in(session);
                    navigate(&home.path(), Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Registration failed: {}", e).into());
                    set_error.set(Some(e.user_message(REGISTRATION_FAILED)));
                }
            }
            set_submitting.set(false);
        });
    };

    let on_role = move |ev: web_sys::Event| {
        let role = event_target_value(&ev).parse().unwrap_or(Role::Client);
        form.update(|f| f.role = role);
    };

    view! {
        <div class="flex justify-center py-12">
            <div class="w-full max-w-md bg-gray-800 rounded-lg shadow-lg p-8">
                <h2 class="text-2xl font-bold text-center mb-6">"Register"</h2>

                {move || error.get().map(|msg| view! { <Alert message=msg /> })}

                <form on:submit=on_submit class="space-y-4">
                    <Field
                        id="username"
                        label="Username:"
                        value=Signal::derive(move || form.with(|f| f.username.clone()))
                        on_input=move |v| form.update(|f| f.username = v)
                    />
                    <Field
                        id="email"
                        label="Email:"
                        kind="email"
                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                        on_input=move |v| form.update(|f| f.email = v)
                    />
                    <Field
                        id="password"
                        label="Password:"
                        kind="password"
                        value=Signal::derive(move || form.with(|f| f.password.clone()))
                        on_input=move |v| form.update(|f| f.password = v)
                    />

                    <div>
                        <label for="role" class="block text-sm text-gray-400 mb-1">"Role:"</label>
                        <select
                            id="role"
                            class="w-full bg-gray-700 rounded-lg px-3 py-2"
                            on:change=on_role
                        >
                            <option value="client" selected=move || role.get() == Role::Client>"Client"</option>
                            <option value="counselor" selected=move || role.get() == Role::Counselor>"Counselor"</option>
                        </select>
                    </div>

                    <Field
                        id="name"
                        label="Name:"
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=move |v| form.update(|f| f.name = v)
                    />

                    {move || match role.get() {
                        Role::Counselor => view! {
                            <Field
                                id="specialization"
                                label="Specialization (comma-separated):"
                                value=Signal::derive(move || form.with(|f| f.specialization.clone()))
                                on_input=move |v| form.update(|f| f.specialization = v)
                            />
                            <Field
                                id="sessionRate"
                                label="Session Rate:"
                                kind="number"
                                value=Signal::derive(move || form.with(|f| f.session_rate.clone()))
                                on_input=move |v| form.update(|f| f.session_rate = v)
                            />
                        }.into_view(),
                        Role::Client => view! {
                            <Field
                                id="preferences"
                                label="Preferences (comma-separated):"
                                value=Signal::derive(move || form.with(|f| f.preferences.clone()))
                                on_input=move |v| form.update(|f| f.preferences = v)
                            />
                        }.into_view(),
                    }}

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full bg-green-600 hover:bg-green-700 disabled:bg-gray-600
                               disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                               transition-colors flex items-center justify-center space-x-2"
                    >
                        {move || submitting.get().then(|| view! { <InlineLoading /> })}
                        <span>"Register"</span>
                    </button>
                </form>

                <p class="mt-6 text-center text-gray-400">
                    "Already registered? "
                    <A href=AppRoute::Login.path() class="text-blue-400 hover:underline">"Login"</A>
                </p>
            </div>
        </div>
    }
}

#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")]
    kind: &'static str,
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm text-gray-400 mb-1">{label}</label>
            <input
                type=kind
                id=id
                placeholder=label.trim_end_matches(':')
                class="w-full bg-gray-700 rounded-lg px-3 py-2"
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}
