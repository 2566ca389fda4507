//! Wire Models
//!
//! JSON payloads exchanged with the counseling API. These are fetched fresh
//! on every view and held only for rendering.

pub mod appointment;
pub mod auth;
pub mod counselor;
pub mod payment;

pub use appointment::{
    format_date_in, remove_appointment, Appointment, NewAppointment, PartyProfile, PartyRef,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, Role};
pub use counselor::Counselor;
pub use payment::{CheckoutRequest, CheckoutResponse, VideoToken, PAYMENT_METHOD};
