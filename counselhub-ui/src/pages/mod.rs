//! Pages
//!
//! Top-level page components for each route.

pub mod appointments;
pub mod book_appointment;
pub mod client_dashboard;
pub mod counselor_dashboard;
pub mod home;
pub mod login;
pub mod logout;
pub mod my_appointments;
pub mod payment;
pub mod register;
pub mod video_call;

pub use appointments::Appointments;
pub use book_appointment::BookAppointment;
pub use client_dashboard::ClientDashboard;
pub use counselor_dashboard::CounselorDashboard;
pub use home::Home;
pub use login::Login;
pub use logout::Logout;
pub use my_appointments::MyAppointments;
pub use payment::Payment;
pub use register::Register;
pub use video_call::VideoCall;
