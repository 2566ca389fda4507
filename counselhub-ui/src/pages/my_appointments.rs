//! My Appointments Page
//!
//! A client's own appointments with pay, cancel and join actions.

use leptos::*;
use leptos_router::*;

use counselhub::error::{CANCEL_FAILED_RETRY, FETCH_APPOINTMENTS_FAILED, LOGIN_TO_VIEW_APPOINTMENTS};
use counselhub::models::{remove_appointment, Appointment};
use counselhub::routes::Route as AppRoute;

use crate::api;
use crate::components::{Alert, AppointmentCard, CardButton, ListSkeleton};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn MyAppointments() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let mounted = use_mounted();

    let appointments = create_rw_signal(Vec::<Appointment>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    // Both the token and the user id are needed here
    let session = state
        .current_session()
        .filter(|s| s.user_id.is_some());
    let user_id = session
        .as_ref()
        .and_then(|s| s.user_id.clone())
        .unwrap_or_default();

    {
        let mounted = mounted.clone();
        let session = session.clone();
        spawn_local(async move {
            let Some(session) = session else {
                set_error.set(Some(LOGIN_TO_VIEW_APPOINTMENTS.to_string()));
                set_loading.set(false);
                return;
            };

            let result = api::fetch_client_appointments(&session).await;
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
    }

    let cancel = {
        let state = state.clone();
        Callback::new(move |appointment_id: String| {
            let Some(session) = session.clone() else {
                state.show_error(CANCEL_FAILED_RETRY);
                return;
            };
            let state = state.clone();
            let mounted = mounted.clone();
            spawn_local(async move {
                let result = api::cancel_appointment(&session, &appointment_id).await;
                if !mounted.get() {
                    return;
                }
                match result {
                    Ok(()) => appointments.update(|list| {
                        remove_appointment(list, &appointment_id);
                    }),
                    Err(e) => {
                        web_sys::console::error_1(&format!("Error canceling appointment: {}", e).into());
                        state.show_error(CANCEL_FAILED_RETRY);
                    }
                }
            });
        })
    };

    let go = Callback::new(move |path: String| navigate(&path, Default::default()));

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-blue-400">"My Appointments"</h1>

            {move || {
                if loading.get() {
                    return view! {
                        <p class="text-gray-400">"Loading appointments..."</p>
                        <ListSkeleton />
                    }
                    .into_view();
                }

                let user_id = user_id.clone();
                view! {
                    {move || error.get().map(|msg| view! { <Alert message=msg /> })}

                    {move || appointments.with(Vec::is_empty).then(|| view! {
                        <p class="text-gray-400">"No appointments found."</p>
                    })}

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        <For
                            each=move || appointments.get()
                            key=|a: &Appointment| a.id.clone()
                            children=move |appt: Appointment| {
                                let pay = AppRoute::payment(
                                    appt.client.id(),
                                    appt.counselor.id(),
                                    appt.counselor.session_rate(),
                                )
                                .path();
                                let call = AppRoute::video_call(&appt.id, &user_id).path();
                                let id = appt.id.clone();
                                let title = appt.counselor_name("Unknown Counselor").to_string();
                                view! {
                                    <AppointmentCard title=title appointment=appt>
                                        <CardButton label="Pay" tone="success" on_click=move |_| go.call(pay.clone()) />
                                        <CardButton label="Cancel" tone="danger" on_click=move |_| cancel.call(id.clone()) />
                                        <CardButton label="Join Video Call" on_click=move |_| go.call(call.clone()) />
                                    </AppointmentCard>
                                }
                            }
                        />
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}
