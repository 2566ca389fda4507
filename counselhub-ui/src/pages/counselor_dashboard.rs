//! Counselor Dashboard

use leptos::*;
use leptos_router::*;

use counselhub::error::{ApiError, CANCEL_FAILED, FETCH_APPOINTMENTS_FAILED};
use counselhub::models::{remove_appointment, Appointment};
use counselhub::routes::Route as AppRoute;

use crate::api;
use crate::components::{Alert, AppointmentCard, CardButton, Loading};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn CounselorDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let mounted = use_mounted();

    let appointments = create_rw_signal(Vec::<Appointment>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    let session = state.current_session();
    let user_id = session
        .as_ref()
        .and_then(|s| s.user_id.clone())
        .unwrap_or_default();

    {
        let mounted = mounted.clone();
        let session = session.clone();
        spawn_local(async move {
            let result = match &session {
                Some(s) => api::fetch_counselor_appointments(s).await,
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
    }

    let cancel = Callback::new(move |appointment_id: String| {
        let Some(session) = session.clone() else {
            set_error.set(Some(ApiError::MissingSession.user_message(CANCEL_FAILED)));
            return;
        };
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
                    web_sys::console::error_1(&format!("Error cancelling appointment: {}", e).into());
                    set_error.set(Some(e.user_message(CANCEL_FAILED)));
                }
            }
        });
    });

    let go = Callback::new(move |path: String| navigate(&path, Default::default()));

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-center">"Counselor Dashboard"</h1>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }
                if let Some(msg) = error.get() {
                    return view! { <Alert message=msg /> }.into_view();
                }

                let user_id = user_id.clone();
                view! {
                    <div>
                        <A
                            href=AppRoute::Appointments.path()
                            class="inline-block px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                        >
                            "View All Appointments"
                        </A>
                    </div>

                    {move || appointments.with(Vec::is_empty).then(|| view! {
                        <p class="text-gray-400">"No appointments found."</p>
                    })}

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <For
                            each=move || appointments.get()
                            key=|a: &Appointment| a.id.clone()
                            children=move |appt: Appointment| {
                                let call = AppRoute::video_call(&appt.id, &user_id).path();
                                let id = appt.id.clone();
                                let title = appt
                                    .client
                                    .name()
                                    .map(|name| format!("Client: {}", name))
                                    .unwrap_or_else(|| "Unknown Client".to_string());
                                view! {
                                    <AppointmentCard title=title appointment=appt>
                                        <CardButton label="Join Video Call" tone="info" on_click=move |_| go.call(call.clone()) />
                                        <CardButton label="Cancel" tone="danger" on_click=move |_| cancel.call(id.clone()) />
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
