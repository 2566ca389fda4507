//! Payment Page
//!
//! Starts a hosted checkout and hands the whole page over to it.

use leptos::*;
use leptos_router::*;

use counselhub::error::{ApiError, PAYMENT_FAILED};
use counselhub::models::CheckoutRequest;
use counselhub::validation::parse_amount;

use crate::api;
use crate::components::{Alert, InlineLoading};
use crate::state::{use_mounted, GlobalState};

#[component]
pub fn Payment() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let mounted = use_mounted();
    let params = use_params_map();

    let (client_id, raw_amount, counselor_id) = params.with_untracked(|p| {
        let get = |key: &str| p.get(key).cloned().unwrap_or_default();
        (get("client_id"), get("amount"), get("counselor_id"))
    });
    let parsed = parse_amount(&raw_amount);
    let invalid = parsed.as_ref().err().map(|e| e.message().to_string());
    let amount = parsed.ok();

    let (processing, set_processing) = create_signal(false);
    let (error, set_error) = create_signal(invalid);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(amount) = amount else {
            return;
        };
        let Some(session) = state.current_session() else {
            set_error.set(Some(ApiError::MissingSession.user_message(PAYMENT_FAILED)));
            return;
        };

        set_error.set(None);
        set_processing.set(true);

        let request = CheckoutRequest::new(client_id.clone(), counselor_id.clone(), amount);
        let state = state.clone();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api::checkout(&session, &request).await;
            if !mounted.get() {
                return;
            }
            match result.and_then(|url| redirect_to(&url)) {
                Ok(()) => {}
                Err(e) => {
                    web_sys::console::error_1(&format!("Payment failed: {}", e).into());
                    let msg = e.user_message(PAYMENT_FAILED);
                    state.show_error(&msg);
                    set_error.set(Some(msg));
                    set_processing.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-lg mx-auto py-12 text-center">
            <h1 class="text-3xl font-bold mb-4">"Payment"</h1>

            {move || error.get().map(|msg| view! { <Alert message=msg /> })}

            {amount.map(|amount| view! {
                <p class="text-lg text-gray-300 mb-6">
                    {amount_notice(amount)}
                </p>
            })}

            <form on:submit=on_submit>
                <button
                    type="submit"
                    disabled=move || processing.get() || amount.is_none()
                    class="px-8 py-3 text-lg bg-green-600 hover:bg-green-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg font-semibold
                           inline-flex items-center space-x-2"
                >
                    {move || if processing.get() {
                        view! {
                            <InlineLoading />
                            <span>"Processing..."</span>
                        }.into_view()
                    } else {
                        view! { <span>"Pay Now"</span> }.into_view()
                    }}
                </button>
            </form>
        </div>
    }
}

/// Full-page navigation to the hosted checkout
fn redirect_to(url: &str) -> Result<(), ApiError> {
    web_sys::window()
        .ok_or_else(|| ApiError::Invalid(PAYMENT_FAILED.to_string()))?
        .location()
        .assign(url)
        .map_err(|_| ApiError::Invalid(PAYMENT_FAILED.to_string()))
}

fn amount_notice(amount: f64) -> String {
    format!("You are about to pay ${} for your session.", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_notice() {
        assert_eq!(amount_notice(60.0), "You are about to pay $60 for your session.");
        assert_eq!(amount_notice(45.5), "You are about to pay $45.5 for your session.");
    }
}
