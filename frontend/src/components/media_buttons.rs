//! Media Capture Buttons
//!
//! Camera and screen-capture toggles. The acquired stream is handed to the
//! parent purely for preview rendering; stopping a capture (or destroying
//! the component) stops every track so the browser releases the device.

use gloo::utils::window;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Camera,
    Screen,
}

#[derive(Properties, PartialEq)]
pub struct MediaButtonsProps {
    /// Emitted with `Some(stream)` when a capture starts and `None` when it
    /// stops.
    pub on_video_stream_change: Callback<Option<MediaStream>>,
    #[prop_or(true)]
    pub supports_video: bool,
    #[prop_or(false)]
    pub disabled: bool,
}

pub enum MediaButtonsMsg {
    Toggle(CaptureKind),
    Acquired(CaptureKind, MediaStream),
    Stopped,
    Error(String),
}

pub struct MediaButtons {
    active: Option<(CaptureKind, MediaStream)>,
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

async fn acquire(kind: CaptureKind) -> Result<MediaStream, String> {
    let navigator = window().navigator();
    let media_devices = navigator
        .media_devices()
        .map_err(|_| "failed to get media devices")?;

    let promise = match kind {
        CaptureKind::Camera => {
            let constraints = MediaStreamConstraints::new();
            constraints.set_video(&JsValue::TRUE);
            constraints.set_audio(&JsValue::FALSE);
            media_devices
                .get_user_media_with_constraints(&constraints)
                .map_err(|_| "failed to request camera access")?
        }
        CaptureKind::Screen => media_devices
            .get_display_media()
            .map_err(|_| "screen capture not supported")?,
    };

    JsFuture::from(promise)
        .await
        .map_err(|e| format!("capture request denied: {e:?}"))?
        .dyn_into()
        .map_err(|_| "invalid media stream".to_string())
}

impl Component for MediaButtons {
    type Message = MediaButtonsMsg;
    type Properties = MediaButtonsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { active: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MediaButtonsMsg::Toggle(kind) => {
                if ctx.props().disabled {
                    return false;
                }
                if let Some((active_kind, _)) = &self.active {
                    if *active_kind == kind {
                        ctx.link().send_message(MediaButtonsMsg::Stopped);
                        return false;
                    }
                }
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match acquire(kind).await {
                        Ok(stream) => link.send_message(MediaButtonsMsg::Acquired(kind, stream)),
                        Err(e) => link.send_message(MediaButtonsMsg::Error(e)),
                    }
                });
                false
            }
            MediaButtonsMsg::Acquired(kind, stream) => {
                // Switching capture source: release the previous one first.
                if let Some((_, previous)) = self.active.take() {
                    stop_tracks(&previous);
                }
                ctx.props()
                    .on_video_stream_change
                    .emit(Some(stream.clone()));
                self.active = Some((kind, stream));
                true
            }
            MediaButtonsMsg::Stopped => {
                if let Some((_, stream)) = self.active.take() {
                    stop_tracks(&stream);
                }
                ctx.props().on_video_stream_change.emit(None);
                true
            }
            MediaButtonsMsg::Error(message) => {
                log::error!("media capture error: {}", message);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !ctx.props().supports_video {
            return html! {};
        }

        let active_kind = self.active.as_ref().map(|(kind, _)| *kind);
        let disabled = ctx.props().disabled;

        let button = |kind: CaptureKind, icon: &str, label: &str| {
            let is_active = active_kind == Some(kind);
            let onclick = ctx.link().callback(move |_| MediaButtonsMsg::Toggle(kind));
            let class = classes!("media-button", is_active.then_some("active"));
            html! {
                <button {class} {onclick} {disabled} title={label.to_string()} type="button">
                    { if is_active { "\u{23f9}".to_string() } else { icon.to_string() } }
                </button>
            }
        };

        html! {
            <div class="media-buttons">
                { button(CaptureKind::Camera, "\u{1f3a5}", "Toggle camera") }
                { button(CaptureKind::Screen, "\u{1f5a5}", "Toggle screen capture") }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some((_, stream)) = self.active.take() {
            stop_tracks(&stream);
        }
    }
}
