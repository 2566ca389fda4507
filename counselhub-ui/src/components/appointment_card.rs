//! Appointment Card Component
//!
//! One appointment with a row of caller-supplied actions.

use leptos::*;

use counselhub::models::Appointment;

#[component]
pub fn AppointmentCard(
    #[prop(into)]
    title: String,
    appointment: Appointment,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-5 shadow flex flex-col">
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <p class="text-gray-300 text-sm">
                <span class="text-gray-500">"Date: "</span>
                {appointment.display_date()}
            </p>
            <p class="text-gray-300 text-sm mb-4">
                <span class="text-gray-500">"Session Type: "</span>
                {appointment.session_type.clone()}
            </p>
            <div class="flex flex-col gap-2 mt-auto">
                {children()}
            </div>
        </div>
    }
}

/// Full-width card action
#[component]
pub fn CardButton(
    label: &'static str,
    #[prop(default = "bg-primary")]
    tone: &'static str,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    let color = match tone {
        "success" => "bg-green-600 hover:bg-green-700",
        "danger" => "bg-red-600 hover:bg-red-700",
        "info" => "bg-sky-600 hover:bg-sky-700",
        _ => "bg-blue-600 hover:bg-blue-700",
    };

    view! {
        <button
            type="button"
            on:click=on_click
            class=format!("w-full rounded-lg py-2 font-medium transition-colors {}", color)
        >
            {label}
        </button>
    }
}
