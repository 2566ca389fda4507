//! CounselHub Web App
//!
//! Online counseling front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Client and counselor dashboards
//! - Appointment booking and cancellation
//! - Hosted checkout for session payments
//! - In-browser video calls
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the counseling REST API over HTTP; the only
//! state kept between views is the login session in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod video;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
