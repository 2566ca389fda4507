//! Counseling API Client
//!
//! Async HTTP client for the counseling platform's REST API. Every call is a
//! single request: no retries, failures come back as [`ApiError`].

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::call::INVALID_TOKEN;
use crate::config::ApiConfig;
use crate::endpoints;
use crate::error::{ApiError, ApiResult, PAYMENT_FAILED};
use crate::models::{
    Appointment, AuthResponse, CheckoutRequest, CheckoutResponse, Counselor, LoginRequest,
    NewAppointment, RegisterRequest, VideoToken,
};
use crate::session::Session;

/// REST client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base: config.base(),
        })
    }

    /// Base URL requests are sent to
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let req = self.client.post(endpoints::login(&self.base)).json(request);
        self.send_json(req).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let req = self.client.post(endpoints::register(&self.base)).json(request);
        self.send_json(req).await
    }

    /// `GET /counselors` (public)
    pub async fn counselors(&self) -> ApiResult<Vec<Counselor>> {
        let req = self.client.get(endpoints::counselors(&self.base));
        self.send_json(req).await
    }

    /// `GET /appointments/client/{id}`
    pub async fn client_appointments(&self, session: &Session) -> ApiResult<Vec<Appointment>> {
        let url = endpoints::client_appointments(&self.base, session.require_user_id()?);
        self.send_json(self.authed(self.client.get(url), session)).await
    }

    /// `GET /appointments/counselor/{id}`
    pub async fn counselor_appointments(&self, session: &Session) -> ApiResult<Vec<Appointment>> {
        let url = endpoints::counselor_appointments(&self.base, session.require_user_id()?);
        self.send_json(self.authed(self.client.get(url), session)).await
    }

    /// The signed-in user's appointments, by role
    pub async fn appointments_for(&self, session: &Session) -> ApiResult<Vec<Appointment>> {
        let url =
            endpoints::appointments_for(&self.base, Some(session.role), session.user_id.as_deref());
        let list: Option<Vec<Appointment>> =
            self.send_json(self.authed(self.client.get(url), session)).await?;
        Ok(list.unwrap_or_default())
    }

    /// `POST /appointments`
    pub async fn book(&self, session: &Session, appointment: &NewAppointment) -> ApiResult<()> {
        let req = self
            .client
            .post(endpoints::appointments(&self.base))
            .json(appointment);
        self.send(self.authed(req, session)).await.map(|_| ())
    }

    /// `DELETE /appointments/{id}`
    pub async fn cancel(&self, session: &Session, appointment_id: &str) -> ApiResult<()> {
        let req = self
            .client
            .delete(endpoints::appointment(&self.base, appointment_id));
        self.send(self.authed(req, session)).await.map(|_| ())
    }

    /// `POST /payments/checkout`, returning the hosted checkout URL
    pub async fn checkout(&self, session: &Session, request: &CheckoutRequest) -> ApiResult<String> {
        let req = self.client.post(endpoints::checkout(&self.base)).json(request);
        let resp: CheckoutResponse = self.send_json(self.authed(req, session)).await?;

        if resp.url.trim().is_empty() {
            return Err(ApiError::Invalid(PAYMENT_FAILED.to_string()));
        }
        Ok(resp.url)
    }

    /// `GET /video-token`, returning the channel join token
    pub async fn video_token(&self, channel: &str, uid: &str) -> ApiResult<String> {
        let req = self
            .client
            .get(endpoints::video_token(&self.base, channel, uid));
        let resp: VideoToken = self.send_json(req).await?;

        if resp.token.is_empty() {
            return Err(ApiError::Invalid(INVALID_TOKEN.to_string()));
        }
        Ok(resp.token)
    }

    fn authed(&self, req: RequestBuilder, session: &Session) -> RequestBuilder {
        req.bearer_auth(&session.token)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let response = self.send(req).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let req = req.build()?;
        let method = req.method().clone();
        let url = req.url().path().to_string();

        tracing::debug!(%method, %url, "api request");

        let response = self.client.execute(req).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(%method, %url, status = status.as_u16(), "api returned error status");
        Err(ApiError::from_status(status.as_u16(), &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LOGIN_FAILED;
    use crate::models::Role;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::{delete, get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "Bearer jwt")
            .unwrap_or(false)
    }

    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["email"] == "amy@example.com" && body["password"] == "secret" {
            (
                StatusCode::OK,
                Json(json!({"token": "jwt", "role": "client", "userId": "u1", "username": "amy"})),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
        }
    }

    async fn counselors() -> Json<Value> {
        Json(json!([
            {"_id": "c1", "name": "Dr. Lee", "specialization": ["grief"], "sessionRate": 60},
            {"_id": "c2", "name": "Sam"}
        ]))
    }

    async fn client_appointments(
        Path(user_id): Path<String>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token missing"})));
        }
        (
            StatusCode::OK,
            Json(json!([{
                "_id": "a1",
                "client": user_id,
                "counselor": {"_id": "c1", "name": "Dr. Lee", "sessionRate": 60},
                "date": "2030-01-01T10:00:00.000Z",
                "sessionType": "Intro"
            }])),
        )
    }

    async fn book(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token missing"})));
        }
        if body["sessionType"] == "taken" {
            return (StatusCode::CONFLICT, Json(json!({"error": "Slot already booked"})));
        }
        (StatusCode::CREATED, Json(body))
    }

    async fn cancel(Path(id): Path<String>, headers: HeaderMap) -> StatusCode {
        match (authorized(&headers), id.as_str()) {
            (false, _) => StatusCode::UNAUTHORIZED,
            (true, "a1") => StatusCode::NO_CONTENT,
            _ => StatusCode::NOT_FOUND,
        }
    }

    async fn checkout(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        match body["counselor"].as_str() {
            Some("c1") => (
                StatusCode::OK,
                Json(json!({"url": "https://checkout.example/s/1"})),
            ),
            Some("blank") => (StatusCode::OK, Json(json!({}))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Counselor not found"})),
            ),
        }
    }

    async fn video_token(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let channel = params.get("channelName").cloned().unwrap_or_default();
        if channel == "empty" {
            Json(json!({"token": ""}))
        } else {
            Json(json!({"token": format!("tok-{}-{}", channel, params["uid"])}))
        }
    }

    async fn spawn_stub() -> ApiClient {
        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/counselors", get(counselors))
            .route("/appointments", post(book))
            .route("/appointments/client/:id", get(client_appointments))
            .route("/appointments/:id", delete(cancel))
            .route("/payments/checkout", post(checkout))
            .route("/video-token", get(video_token));
        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiClient::new(&ApiConfig {
            base_url: format!("http://{}/api/", addr),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    fn session() -> Session {
        Session {
            token: "jwt".into(),
            role: Role::Client,
            user_id: Some("u1".into()),
            username: Some("amy".into()),
        }
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let client = spawn_stub().await;

        let ok = client
            .login(&LoginRequest {
                email: "amy@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.role, Role::Client);
        assert_eq!(ok.user_id, "u1");

        let err = client
            .login(&LoginRequest {
                email: "amy@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(LOGIN_FAILED), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_counselors_are_public() {
        let client = spawn_stub().await;
        let list = client.counselors().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].specialization_label(), "grief");
        assert_eq!(list[1].specialization_label(), "N/A");
    }

    #[tokio::test]
    async fn test_appointments_send_bearer_token() {
        let client = spawn_stub().await;

        let list = client.client_appointments(&session()).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].client.id(), "u1");
        assert_eq!(list[0].counselor_name("Unknown"), "Dr. Lee");

        let by_role = client.appointments_for(&session()).await.unwrap();
        assert_eq!(by_role, list);

        let stale = Session {
            token: "expired".into(),
            ..session()
        };
        let err = client.client_appointments(&stale).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_missing_user_id_issues_no_request() {
        let client = spawn_stub().await;
        let anonymous = Session {
            user_id: None,
            ..session()
        };

        let err = client.client_appointments(&anonymous).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingSession));
    }

    #[tokio::test]
    async fn test_book_and_conflict() {
        let client = spawn_stub().await;
        let mut appt = NewAppointment {
            client: "u1".into(),
            counselor: "c1".into(),
            date: "2030-01-01T10:00".into(),
            session_type: "Intro".into(),
        };
        client.book(&session(), &appt).await.unwrap();

        appt.session_type = "taken".into();
        let err = client.book(&session(), &appt).await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "Slot already booked");
    }

    #[tokio::test]
    async fn test_cancel_handles_empty_body() {
        let client = spawn_stub().await;
        client.cancel(&session(), "a1").await.unwrap();

        let err = client.cancel(&session(), "zzz").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(err.user_message("Failed to cancel appointment."), "Failed to cancel appointment.");
    }

    #[tokio::test]
    async fn test_checkout_url_and_errors() {
        let client = spawn_stub().await;

        let url = client
            .checkout(&session(), &CheckoutRequest::new("u1", "c1", 60.0))
            .await
            .unwrap();
        assert_eq!(url, "https://checkout.example/s/1");

        let err = client
            .checkout(&session(), &CheckoutRequest::new("u1", "nobody", 60.0))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(PAYMENT_FAILED), "Counselor not found");

        let err = client
            .checkout(&session(), &CheckoutRequest::new("u1", "blank", 60.0))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("x"), PAYMENT_FAILED);
    }

    #[tokio::test]
    async fn test_video_token() {
        let client = spawn_stub().await;

        assert_eq!(client.video_token("a1", "42").await.unwrap(), "tok-a1-42");

        let err = client.video_token("empty", "42").await.unwrap_err();
        assert_eq!(err.user_message("x"), INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9/api".into(),
            request_timeout_secs: 2,
        })
        .unwrap();

        let err = client.counselors().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
