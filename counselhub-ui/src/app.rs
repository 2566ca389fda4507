//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use counselhub::routes::{authorize, Access, Route as AppRoute};

use crate::components::{Nav, Toast};
use crate::pages::{
    Appointments, BookAppointment, ClientDashboard, CounselorDashboard, Home, Login, Logout,
    MyAppointments, Payment, Register, VideoCall,
};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/logout" view=Logout />
                        <Route path="/counselor" view=|| view! { <Guarded><CounselorDashboard /></Guarded> } />
                        <Route path="/client" view=|| view! { <Guarded><ClientDashboard /></Guarded> } />
                        <Route
                            path="/appointment-booking/:counselor_id"
                            view=|| view! { <Guarded><BookAppointment /></Guarded> }
                        />
                        <Route path="/appointments" view=|| view! { <Guarded><Appointments /></Guarded> } />
                        <Route path="/myappointments" view=|| view! { <Guarded><MyAppointments /></Guarded> } />
                        <Route
                            path="/payment/:client_id/:amount/:counselor_id"
                            view=|| view! { <Guarded><Payment /></Guarded> }
                        />
                        <Route
                            path="/video-call/:channel/:uid"
                            view=|| view! { <Guarded><VideoCall /></Guarded> }
                        />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Renders its children only when the session may see the current path,
/// otherwise redirects. Re-checks whenever the session changes.
#[component]
fn Guarded(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let location = use_location();

    move || {
        let route = AppRoute::parse(&location.pathname.get());
        match state.session.with(|s| authorize(&route, s.as_ref())) {
            Access::Allow => children().into_view(),
            Access::Redirect(to) => view! { <Redirect path=to.path() /> }.into_view(),
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=AppRoute::Home.path()
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
