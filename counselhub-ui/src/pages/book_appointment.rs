//! Appointment Booking Page

use leptos::*;
use leptos_router::*;
use std::cell::RefCell;
use std::rc::Rc;

use counselhub::error::{ApiError, BOOKING_FAILED};
use counselhub::routes::Route as AppRoute;
use counselhub::validation::{min_booking_value, validate_booking, MAX_SESSION_TYPE_LEN};

use crate::api;
use crate::components::{Alert, Loading};
use crate::state::{use_mounted, GlobalState};

const REDIRECT_DELAY_MS: u32 = 2000;
const BOOKED: &str = "Appointment booked successfully! Redirecting...";

#[component]
pub fn BookAppointment() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let mounted = use_mounted();
    let params = use_params_map();

    let counselor_id =
        params.with_untracked(|p| p.get("counselor_id").cloned().unwrap_or_default());
    let min_date = min_booking_value(chrono::Local::now().naive_local());

    let (date, set_date) = create_signal(String::new());
    let (session_type, set_session_type) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let (booked, set_booked) = create_signal(false);

    let redirect: Rc<RefCell<Option<gloo_timers::callback::Timeout>>> = Rc::default();
    {
        let redirect = Rc::clone(&redirect);
        on_cleanup(move || {
            redirect.borrow_mut().take();
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let session = state.current_session();
        let client_id = session
            .as_ref()
            .and_then(|s| s.user_id.clone())
            .unwrap_or_default();

        let appointment = match validate_booking(
            &client_id,
            &counselor_id,
            &date.get_untracked(),
            &session_type.get_untracked(),
            chrono::Local::now().naive_local(),
        ) {
            Ok(appointment) => appointment,
            Err(e) => {
                set_error.set(Some(e.message().to_string()));
                return;
            }
        };

        let Some(session) = session.filter(|s| s.user_id.is_some()) else {
            set_error.set(Some(ApiError::MissingSession.user_message(BOOKING_FAILED)));
            return;
        };

        set_submitting.set(true);

        let navigate = navigate.clone();
        let mounted = mounted.clone();
        let redirect = Rc::clone(&redirect);
        spawn_local(async move {
            let result = api::book_appointment(&session, &appointment).await;
            if !mounted.get() {
                return;
            }
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    set_booked.set(true);
                    let timer = gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
                        navigate(&AppRoute::MyAppointments.path(), Default::default());
                    });
                    *redirect.borrow_mut() = Some(timer);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error booking appointment: {}", e).into());
                    set_error.set(Some(e.user_message(BOOKING_FAILED)));
                }
            }
        });
    };

    view! {
        <div class="max-w-lg mx-auto py-8">
            {move || {
                if booked.get() {
                    return view! { <Alert message=BOOKED variant="success" /> }.into_view();
                }

                view! {
                    <h1 class="text-2xl font-bold text-center mb-6">"Book Appointment"</h1>

                    {move || error.get().map(|msg| view! { <Alert message=msg /> })}
                    {move || submitting.get().then(|| view! { <Loading /> })}
                }
                .into_view()
            }}

            <form
                on:submit=on_submit
                class="bg-gray-800 rounded-lg p-6 shadow space-y-4"
                class:hidden=move || booked.get()
            >
                <div>
                    <label for="date" class="block text-sm text-gray-400 mb-1">"Date and Time:"</label>
                    <input
                        type="datetime-local"
                        id="date"
                        required
                        min=min_date
                        class="w-full bg-gray-700 rounded-lg px-3 py-2"
                        prop:value=date
                        on:input=move |ev| set_date.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="sessionType" class="block text-sm text-gray-400 mb-1">"Session Type:"</label>
                    <input
                        type="text"
                        id="sessionType"
                        required
                        maxlength=MAX_SESSION_TYPE_LEN.to_string()
                        class="w-full bg-gray-700 rounded-lg px-3 py-2"
                        prop:value=session_type
                        on:input=move |ev| set_session_type.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold"
                >
                    "Book Appointment"
                </button>
            </form>
        </div>
    }
}
