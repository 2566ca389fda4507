//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod appointment_card;
pub mod loading;
pub mod nav;
pub mod toast;

pub use appointment_card::{AppointmentCard, CardButton};
pub use loading::{InlineLoading, ListSkeleton, Loading};
pub use nav::Nav;
pub use toast::{Alert, Toast};
