//! Video Calls
//!
//! Join flow and teardown for one call. The page owns the resulting
//! [`ActiveCall`] and hangs up when it unmounts.

pub mod agora;

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use counselhub::call::{
    media_error_message, CallRoster, CallUid, CALL_FAILED, SUBSCRIBE_FAILED, UNSUPPORTED_BROWSER,
};
use counselhub::error::ApiError;

use crate::api;
use agora::{LocalTrack, RemoteUser, RtcClient};

type Handler = Closure<dyn FnMut(RemoteUser, String)>;

/// Why a call did not start
#[derive(Debug, Clone, PartialEq)]
pub enum CallError {
    /// The view went away mid-setup; nothing to report
    Aborted,
    /// Message for the user
    Failed(String),
}

impl From<&str> for CallError {
    fn from(msg: &str) -> Self {
        CallError::Failed(msg.to_string())
    }
}

impl From<ApiError> for CallError {
    fn from(e: ApiError) -> Self {
        web_sys::console::error_1(&format!("Error fetching video token: {}", e).into());
        token_failure(&e)
    }
}

/// Only an unusable token gets its own message; every other token failure
/// is reported as a failed call start
fn token_failure(e: &ApiError) -> CallError {
    match e {
        ApiError::Invalid(msg) => CallError::Failed(msg.clone()),
        _ => CALL_FAILED.into(),
    }
}

/// What a running call needs to report into
#[derive(Clone)]
pub struct CallView {
    pub roster: RwSignal<CallRoster>,
    pub error: WriteSignal<Option<String>>,
    pub mounted: Rc<Cell<bool>>,
}

/// A joined, publishing call
pub struct ActiveCall {
    client: RtcClient,
    audio: LocalTrack,
    video: LocalTrack,
    handlers: Vec<Handler>,
}

impl ActiveCall {
    /// Play the local camera into an element
    pub fn play_local(&self, element_id: &str) {
        self.video.play_in(element_id);
    }

    /// Unregister handlers, release the devices and leave the channel
    pub fn hang_up(self) {
        let ActiveCall {
            client,
            audio,
            video,
            handlers,
        } = self;

        client.remove_all_listeners();
        drop(handlers);

        video.stop();
        video.close();
        audio.stop();
        audio.close();

        spawn_local(async move {
            if let Err(e) = client.leave().await {
                web_sys::console::error_1(&JsValue::from_str("Cleanup error:"));
                web_sys::console::error_1(&e);
            }
        });
    }
}

/// Fetch a token, open the devices, join `channel` and publish
pub async fn start_call(
    channel: &str,
    uid_raw: &str,
    app_id: &str,
    view: CallView,
) -> Result<ActiveCall, CallError> {
    if !agora::media_devices_supported() {
        return Err(UNSUPPORTED_BROWSER.into());
    }
    let uid = CallUid::parse(uid_raw).ok_or(CallError::from(CALL_FAILED))?;

    let token = api::fetch_video_token(channel, &uid.to_string()).await?;

    if !agora::is_loaded() {
        web_sys::console::error_1(&"Video SDK not loaded".into());
        return Err(CALL_FAILED.into());
    }

    let tracks = agora::create_microphone_and_camera_tracks()
        .await
        .map_err(|err| {
            web_sys::console::error_1(&JsValue::from_str("Permission error:"));
            web_sys::console::error_1(&err);
            let (name, message) = agora::error_parts(&err);
            CallError::from(media_error_message(&name, &message))
        })?;
    let tracks: js_sys::Array = tracks.unchecked_into();
    let audio: LocalTrack = tracks.get(0).unchecked_into();
    let video: LocalTrack = tracks.get(1).unchecked_into();

    let release = |audio: &LocalTrack, video: &LocalTrack| {
        for track in [video, audio] {
            track.stop();
            track.close();
        }
    };

    if !view.mounted.get() {
        release(&audio, &video);
        return Err(CallError::Aborted);
    }

    if app_id.is_empty() {
        web_sys::console::warn_1(&"COUNSELHUB_VIDEO_APP_ID was not set at build time".into());
    }

    let client = agora::create_client(&agora::client_config());
    let joined = async {
        client
            .join(app_id, channel, &token, &agora::uid_value(&uid))
            .await?;
        let publish = js_sys::Array::of2(&audio, &video);
        client.publish(&publish).await?;
        Ok::<_, JsValue>(())
    };
    if let Err(err) = joined.await {
        web_sys::console::error_1(&JsValue::from_str("Error starting video call:"));
        web_sys::console::error_1(&err);
        release(&audio, &video);
        if let Err(e) = client.leave().await {
            web_sys::console::error_1(&JsValue::from_str("Cleanup error:"));
            web_sys::console::error_1(&e);
        }
        return Err(CALL_FAILED.into());
    }

    let handlers = vec![
        on_user_published(&client, view.clone()),
        on_user_unpublished(&client, view),
    ];

    Ok(ActiveCall {
        client,
        audio,
        video,
        handlers,
    })
}

fn on_user_published(client: &RtcClient, view: CallView) -> Handler {
    let subscriber = client.clone();
    let handler = Closure::<dyn FnMut(RemoteUser, String)>::new(move |user: RemoteUser, media_type: String| {
        let client = subscriber.clone();
        let view = view.clone();
        spawn_local(async move {
            if let Err(err) = client.subscribe(&user, &media_type).await {
                web_sys::console::error_1(&JsValue::from_str("Error handling user published:"));
                web_sys::console::error_1(&err);
                if view.mounted.get() {
                    view.error.set(Some(SUBSCRIBE_FAILED.to_string()));
                }
                return;
            }
            if !view.mounted.get() {
                return;
            }

            let uid = agora::uid_string(&user.uid());
            view.roster.update(|r| {
                r.publish(uid.clone());
            });

            match media_type.as_str() {
                // the tile renders on the next frame
                "video" => request_animation_frame(move || {
                    if let Some(track) = user.video_track() {
                        track.play_in(&CallRoster::tile_id(&uid));
                    }
                }),
                "audio" => {
                    if let Some(track) = user.audio_track() {
                        track.play();
                    }
                }
                _ => {}
            }
        });
    });

    client.on("user-published", handler.as_ref().unchecked_ref());
    handler
}

fn on_user_unpublished(client: &RtcClient, view: CallView) -> Handler {
    let handler = Closure::<dyn FnMut(RemoteUser, String)>::new(move |user: RemoteUser, _media_type: String| {
        if view.mounted.get() {
            let uid = agora::uid_string(&user.uid());
            view.roster.update(|r| {
                r.unpublish(&uid);
            });
        }
    });

    client.on("user-unpublished", handler.as_ref().unchecked_ref());
    handler
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_error_from_message() {
        assert_eq!(
            CallError::from(UNSUPPORTED_BROWSER),
            CallError::Failed("Your browser does not support media devices.".to_string())
        );
        assert_ne!(CallError::from(CALL_FAILED), CallError::Aborted);
    }

    #[test]
    fn test_token_failure_hides_server_text() {
        let failed = CallError::Failed(CALL_FAILED.to_string());

        let status = ApiError::from_status(500, r#"{"error":"Agora certificate missing"}"#);
        assert_eq!(token_failure(&status), failed);
        assert_eq!(token_failure(&ApiError::MissingSession), failed);
        assert_eq!(token_failure(&ApiError::Network("refused".into())), failed);

        let empty = ApiError::Invalid(counselhub::call::INVALID_TOKEN.to_string());
        assert_eq!(
            token_failure(&empty),
            CallError::Failed("Invalid token received from server.".to_string())
        );
    }
}
