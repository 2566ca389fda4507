//! Video Call Page
//!
//! Joins the appointment's channel on mount and hangs up on unmount.
//! Remote tiles follow the roster; each participant's video plays into
//! the tile with its id.

use leptos::*;
use leptos_router::*;
use std::cell::RefCell;
use std::rc::Rc;

use counselhub::call::CallRoster;

use crate::api;
use crate::components::{Alert, Loading};
use crate::state::use_mounted;
use crate::video::{start_call, ActiveCall, CallError, CallView};

const LOCAL_TILE: &str = "local-video";

#[component]
pub fn VideoCall() -> impl IntoView {
    let mounted = use_mounted();
    let params = use_params_map();

    let (channel, uid) = params.with_untracked(|p| {
        let get = |key: &str| p.get(key).cloned().unwrap_or_default();
        (get("channel"), get("uid"))
    });

    let roster = create_rw_signal(CallRoster::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    let call: Rc<RefCell<Option<ActiveCall>>> = Rc::default();
    {
        let call = Rc::clone(&call);
        let mounted = mounted.clone();
        on_cleanup(move || {
            mounted.set(false);
            if let Some(active) = call.borrow_mut().take() {
                active.hang_up();
            }
            let _ = roster.try_update(CallRoster::clear);
        });
    }

    {
        let view = CallView {
            roster,
            error: set_error,
            mounted: mounted.clone(),
        };
        let channel = channel.clone();
        let uid = uid.clone();
        spawn_local(async move {
            let result = start_call(&channel, &uid, api::video_app_id(), view).await;
            if !mounted.get() {
                // unmounted between join and now
                if let Ok(active) = result {
                    active.hang_up();
                }
                return;
            }
            set_loading.set(false);

            match result {
                Ok(active) => {
                    *call.borrow_mut() = Some(active);
                    let call = Rc::clone(&call);
                    request_animation_frame(move || {
                        if let Some(active) = call.borrow().as_ref() {
                            active.play_local(LOCAL_TILE);
                        }
                    });
                }
                Err(CallError::Aborted) => {}
                Err(CallError::Failed(msg)) => set_error.set(Some(msg)),
            }
        });
    }

    let local_label = format!("You (UID: {})", uid);

    view! {
        <div class="space-y-6">
            {move || loading.get().then(|| view! { <Loading /> })}
            {move || error.get().map(|msg| view! { <Alert message=msg /> })}

            <h1 class="text-2xl font-bold text-center">"Video Call"</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="bg-gray-800 rounded-lg p-2">
                    <div id=LOCAL_TILE class="video-tile" />
                    <p class="text-center text-sm text-gray-400 mt-2">{local_label}</p>
                </div>

                <For
                    each=move || roster.with(|r| r.uids().to_vec())
                    key=|uid: &String| uid.clone()
                    children=move |uid: String| view! {
                        <div class="bg-gray-800 rounded-lg p-2">
                            <div id=CallRoster::tile_id(&uid) class="video-tile" />
                            <p class="text-center text-sm text-gray-400 mt-2">{format!("User {}", uid)}</p>
                        </div>
                    }
                />
            </div>
        </div>
    }
}
