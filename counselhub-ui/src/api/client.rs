//! HTTP API Client
//!
//! Functions for communicating with the counseling REST API. Each call is a
//! single request; views turn failures into a message with
//! [`ApiError::user_message`].

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use counselhub::call::INVALID_TOKEN;
use counselhub::endpoints;
use counselhub::error::{ApiError, ApiResult, PAYMENT_FAILED};
use counselhub::models::{
    Appointment, AuthResponse, CheckoutRequest, CheckoutResponse, Counselor, LoginRequest,
    NewAppointment, RegisterRequest, VideoToken,
};
use counselhub::session::Session;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

const API_URL_KEY: &str = "counselhub_api_url";

/// Get the API base URL from local storage, the build environment, or the
/// default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    let url = stored.unwrap_or_else(|| {
        option_env!("COUNSELHUB_API_URL")
            .unwrap_or(DEFAULT_API_BASE)
            .to_string()
    });
    endpoints::normalize_base(&url)
}

/// App id of the hosted video SDK project
pub fn video_app_id() -> &'static str {
    option_env!("COUNSELHUB_VIDEO_APP_ID").unwrap_or("")
}

// ============ Auth ============

pub async fn login(request: &LoginRequest) -> ApiResult<AuthResponse> {
    send_json(Request::post(&endpoints::login(&get_api_base())).json(request)).await
}

pub async fn register(request: &RegisterRequest) -> ApiResult<AuthResponse> {
    send_json(Request::post(&endpoints::register(&get_api_base())).json(request)).await
}

// ============ Counselors & Appointments ============

/// Fetch all counselors (no auth)
pub async fn fetch_counselors() -> ApiResult<Vec<Counselor>> {
    send_json(Request::get(&endpoints::counselors(&get_api_base())).build()).await
}

/// Appointments booked by the signed-in client
pub async fn fetch_client_appointments(session: &Session) -> ApiResult<Vec<Appointment>> {
    let url = endpoints::client_appointments(&get_api_base(), session.require_user_id()?);
    send_json(authed(Request::get(&url), session).build()).await
}

/// Appointments booked with the signed-in counselor
pub async fn fetch_counselor_appointments(session: &Session) -> ApiResult<Vec<Appointment>> {
    let url = endpoints::counselor_appointments(&get_api_base(), session.require_user_id()?);
    send_json(authed(Request::get(&url), session).build()).await
}

/// Appointments for whoever is signed in, by role
pub async fn fetch_appointments(session: &Session) -> ApiResult<Vec<Appointment>> {
    let url = endpoints::appointments_for(
        &get_api_base(),
        Some(session.role),
        session.user_id.as_deref(),
    );
    let list: Option<Vec<Appointment>> =
        send_json(authed(Request::get(&url), session).build()).await?;
    Ok(list.unwrap_or_default())
}

pub async fn book_appointment(session: &Session, appointment: &NewAppointment) -> ApiResult<()> {
    let url = endpoints::appointments(&get_api_base());
    send(authed(Request::post(&url), session).json(appointment)).await?;
    Ok(())
}

pub async fn cancel_appointment(session: &Session, appointment_id: &str) -> ApiResult<()> {
    let url = endpoints::appointment(&get_api_base(), appointment_id);
    send(authed(Request::delete(&url), session).build()).await?;
    Ok(())
}

// ============ Payments & Video ============

/// Start a checkout; returns the hosted payment page URL
pub async fn checkout(session: &Session, request: &CheckoutRequest) -> ApiResult<String> {
    let url = endpoints::checkout(&get_api_base());
    let resp: CheckoutResponse = send_json(authed(Request::post(&url), session).json(request)).await?;

    if resp.url.trim().is_empty() {
        return Err(ApiError::Invalid(PAYMENT_FAILED.to_string()));
    }
    Ok(resp.url)
}

/// Join token for a video channel
pub async fn fetch_video_token(channel: &str, uid: &str) -> ApiResult<String> {
    let url = endpoints::video_token(&get_api_base(), channel, uid);
    let resp: VideoToken = send_json(Request::get(&url).build()).await?;

    if resp.token.is_empty() {
        return Err(ApiError::Invalid(INVALID_TOKEN.to_string()));
    }
    Ok(resp.token)
}

// ============ Plumbing ============

fn authed(builder: gloo_net::http::RequestBuilder, session: &Session) -> gloo_net::http::RequestBuilder {
    builder.header("Authorization", &endpoints::bearer(&session.token))
}

async fn send(request: Result<Request, gloo_net::Error>) -> ApiResult<Response> {
    let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        web_sys::console::error_1(&format!("API error {} from {}", status, response.url()).into());
        return Err(ApiError::from_status(status, &text));
    }

    Ok(response)
}

async fn send_json<T: DeserializeOwned>(request: Result<Request, gloo_net::Error>) -> ApiResult<T> {
    let response = send(request).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
