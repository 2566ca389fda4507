//! Appointments Page
//!
//! Paginated table of the signed-in user's appointments, fetched by role.

use leptos::*;
use leptos_router::*;

use counselhub::error::{ApiError, FETCH_APPOINTMENTS_FAILED};
use counselhub::models::Appointment;
use counselhub::pagination::{Pager, APPOINTMENTS_PER_PAGE};
use counselhub::routes::Route as AppRoute;

use crate::api;
use crate::components::{Alert, Loading};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn Appointments() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let mounted = use_mounted();

    let appointments = create_rw_signal(Vec::<Appointment>::new());
    let (page, set_page) = create_signal(0usize);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    let session = state.current_session();
    let user_id = session
        .as_ref()
        .and_then(|s| s.user_id.clone())
        .unwrap_or_default();

    spawn_local(async move {
        let result = match &session {
            Some(s) => api::fetch_appointments(s).await,
            None => Err(ApiError::MissingSession),
        };
        if !mounted.get() {
            return;
        }
        match result {
            Ok(list) => appointments.set(list),
            Err(e) => {
                web_sys::console::error_1(&format!("Error fetching appointments: {}", e).into());
                set_error.set(Some(e.user_message(FETCH_APPOINTMENTS_FAILED)));
            }
        }
        set_loading.set(false);
    });

    let pager = create_memo(move |_| {
        Pager::new(appointments.with(Vec::len), APPOINTMENTS_PER_PAGE)
    });

    let rows = move || {
        let pager = pager.get();
        let page = pager.clamp(page.get());
        appointments.with(|list| pager.slice(list, page).to_vec())
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-center">"All Appointments"</h1>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }
                if let Some(msg) = error.get() {
                    return view! { <Alert message=msg /> }.into_view();
                }

                let user_id = user_id.clone();
                view! {
                    <div class="overflow-x-auto">
                        <table class="w-full text-left border border-gray-700">
                            <thead class="bg-gray-800">
                                <tr>
                                    <th class="px-4 py-2">"Client"</th>
                                    <th class="px-4 py-2">"Counselor"</th>
                                    <th class="px-4 py-2">"Date/Time"</th>
                                    <th class="px-4 py-2">"Session Type"</th>
                                    <th class="px-4 py-2">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=rows
                                    key=|a: &Appointment| a.id.clone()
                                    children=move |appt: Appointment| {
                                        let join = AppRoute::video_call(&appt.id, &user_id).path();
                                        view! {
                                            <tr class="odd:bg-gray-900 even:bg-gray-800 border-t border-gray-700">
                                                <td class="px-4 py-2">{appt.client_name("Unknown").to_string()}</td>
                                                <td class="px-4 py-2">{appt.counselor_name("Unknown").to_string()}</td>
                                                <td class="px-4 py-2">{appt.display_date()}</td>
                                                <td class="px-4 py-2">{appt.session_type.clone()}</td>
                                                <td class="px-4 py-2">
                                                    <A
                                                        href=join
                                                        class="px-3 py-1 text-sm bg-sky-600 hover:bg-sky-700 rounded"
                                                    >
                                                        "Join"
                                                    </A>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <Pagination pager=pager.into() page=page set_page=set_page />
                }
                .into_view()
            }}
        </div>
    }
}

/// Previous / numbered / Next page controls
#[component]
fn Pagination(
    pager: Signal<Pager>,
    page: ReadSignal<usize>,
    set_page: WriteSignal<usize>,
) -> impl IntoView {
    let button = "px-3 py-1 rounded border border-gray-700 disabled:opacity-40";

    view! {
        <nav class="flex justify-center items-center gap-1 mt-4">
            <button
                class=button
                disabled=move || !pager.get().has_previous(page.get())
                on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
            >
                "Previous"
            </button>

            {move || {
                (0..pager.get().page_count())
                    .map(|n| view! {
                        <button
                            class=move || if page.get() == n {
                                format!("{} bg-blue-600", button)
                            } else {
                                format!("{} hover:bg-gray-700", button)
                            }
                            on:click=move |_| set_page.set(n)
                        >
                            {n + 1}
                        </button>
                    })
                    .collect_view()
            }}

            <button
                class=button
                disabled=move || !pager.get().has_next(page.get())
                on:click=move |_| set_page.update(|p| *p += 1)
            >
                "Next"
            </button>
        </nav>
    }
}
