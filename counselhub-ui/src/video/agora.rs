//! Bindings to the hosted real-time video SDK (`AgoraRTC` global, loaded by
//! a script tag in `index.html`). Wrappers only; call state lives in
//! [`super::ActiveCall`].

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use counselhub::call::CallUid;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = AgoraRTC, js_name = createClient)]
    pub fn create_client(config: &JsValue) -> RtcClient;

    /// Resolves to `[microphoneTrack, cameraTrack]`
    #[wasm_bindgen(js_namespace = AgoraRTC, js_name = createMicrophoneAndCameraTracks, catch)]
    pub async fn create_microphone_and_camera_tracks() -> Result<JsValue, JsValue>;

    #[derive(Clone)]
    pub type RtcClient;

    #[wasm_bindgen(method, catch)]
    pub async fn join(
        this: &RtcClient,
        app_id: &str,
        channel: &str,
        token: &str,
        uid: &JsValue,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub async fn publish(this: &RtcClient, tracks: &Array) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub async fn subscribe(
        this: &RtcClient,
        user: &RemoteUser,
        media_type: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub async fn leave(this: &RtcClient) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &RtcClient, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = removeAllListeners)]
    pub fn remove_all_listeners(this: &RtcClient);

    /// Local microphone or camera track
    pub type LocalTrack;

    #[wasm_bindgen(method, js_name = play)]
    pub fn play_in(this: &LocalTrack, element_id: &str);

    #[wasm_bindgen(method)]
    pub fn stop(this: &LocalTrack);

    #[wasm_bindgen(method)]
    pub fn close(this: &LocalTrack);

    /// A remote participant as passed to `user-published`
    pub type RemoteUser;

    #[wasm_bindgen(method, getter)]
    pub fn uid(this: &RemoteUser) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = videoTrack)]
    pub fn video_track(this: &RemoteUser) -> Option<RemoteTrack>;

    #[wasm_bindgen(method, getter, js_name = audioTrack)]
    pub fn audio_track(this: &RemoteUser) -> Option<RemoteTrack>;

    pub type RemoteTrack;

    #[wasm_bindgen(method)]
    pub fn play(this: &RemoteTrack);

    #[wasm_bindgen(method, js_name = play)]
    pub fn play_in(this: &RemoteTrack, element_id: &str);
}

/// Whether the SDK script loaded
pub fn is_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("AgoraRTC")).unwrap_or(false)
}

/// Whether `navigator.mediaDevices.getUserMedia` exists
pub fn media_devices_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let devices = Reflect::get(&window.navigator(), &JsValue::from_str("mediaDevices"))
        .unwrap_or(JsValue::UNDEFINED);
    if devices.is_undefined() || devices.is_null() {
        return false;
    }
    Reflect::get(&devices, &JsValue::from_str("getUserMedia"))
        .map(|f| f.is_function())
        .unwrap_or(false)
}

/// `{ mode: 'rtc', codec: 'vp8' }`
pub fn client_config() -> JsValue {
    let config = Object::new();
    let _ = Reflect::set(&config, &"mode".into(), &"rtc".into());
    let _ = Reflect::set(&config, &"codec".into(), &"vp8".into());
    config.into()
}

/// The uid as the SDK expects it on join
pub fn uid_value(uid: &CallUid) -> JsValue {
    match uid {
        CallUid::Numeric(n) => JsValue::from(*n),
        CallUid::Account(s) => JsValue::from_str(s),
    }
}

/// A remote uid (number or string) as text
pub fn uid_string(uid: &JsValue) -> String {
    uid.as_f64()
        .map(|n| format!("{}", n as u64))
        .or_else(|| uid.as_string())
        .unwrap_or_default()
}

/// `name` and `message` of a thrown error
pub fn error_parts(err: &JsValue) -> (String, String) {
    let field = |key: &str| {
        Reflect::get(err, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    let message = err.as_string().unwrap_or_else(|| field("message"));
    (field("name"), message)
}
