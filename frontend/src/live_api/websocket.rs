//! WebSocket plumbing for the live session.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use shared::{live_ws_url, ClientMessage, LiveConfig, LiveError, ServerMessage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

/// Shared handle to the outgoing half of the socket.
pub type WsSender = Rc<RefCell<Option<SplitSink<WebSocket, Message>>>>;

/// Events delivered back to the provider, tagged with the generation id of
/// the connect attempt that produced them.
pub enum WsEvent {
    Opened(WsSender),
    SetupComplete,
    Server(ServerMessage),
    Closed,
    Error(LiveError),
}

/// Open the live socket, send the `setup` frame, and pump inbound frames.
/// Returns immediately; events arrive through `on_event` carrying the given
/// `session` id so the provider can discard events from superseded sockets.
pub fn open_session(
    session: u64,
    api_key: String,
    setup: LiveConfig,
    on_event: Callback<(u64, WsEvent)>,
) {
    spawn_local(async move {
        let endpoint = live_ws_url(&api_key);
        match WebSocket::open(&endpoint) {
            Ok(ws) => {
                let (mut sender, mut receiver) = ws.split();

                let setup_frame = match serde_json::to_string(&ClientMessage::Setup(setup)) {
                    Ok(json) => json,
                    Err(e) => {
                        let err = LiveError::Serialize(e.to_string());
                        on_event.emit((session, WsEvent::Error(err)));
                        return;
                    }
                };
                if let Err(e) = sender.send(Message::Text(setup_frame)).await {
                    let err = LiveError::Socket(format!("setup send failed: {e:?}"));
                    on_event.emit((session, WsEvent::Error(err)));
                    return;
                }

                let sender = Rc::new(RefCell::new(Some(sender)));
                on_event.emit((session, WsEvent::Opened(sender)));

                while let Some(msg) = receiver.next().await {
                    match msg {
                        Ok(Message::Text(text)) => dispatch(session, &text, &on_event),
                        // The service delivers JSON in binary frames as well.
                        Ok(Message::Bytes(bytes)) => match String::from_utf8(bytes) {
                            Ok(text) => dispatch(session, &text, &on_event),
                            Err(_) => log::warn!("dropping non-UTF-8 server frame"),
                        },
                        Err(e) => {
                            log::error!("Live WebSocket error: {:?}", e);
                            let err = LiveError::Socket(format!("{e:?}"));
                            on_event.emit((session, WsEvent::Error(err)));
                            break;
                        }
                    }
                }
                on_event.emit((session, WsEvent::Closed));
            }
            Err(e) => {
                log::error!("Failed to connect live WebSocket: {:?}", e);
                let err = LiveError::Socket(format!("{e:?}"));
                on_event.emit((session, WsEvent::Error(err)));
            }
        }
    });
}

fn dispatch(session: u64, text: &str, on_event: &Callback<(u64, WsEvent)>) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(msg) if msg.setup_complete.is_some() => {
            on_event.emit((session, WsEvent::SetupComplete))
        }
        Ok(msg) => on_event.emit((session, WsEvent::Server(msg))),
        Err(e) => log::warn!("unparsed server frame: {}", e),
    }
}

/// Send a frame over the socket. The sender is taken out of the cell for
/// the await and put back afterwards so concurrent sends cannot alias it.
pub fn send_message(sender: &WsSender, msg: ClientMessage) {
    let sender_rc = sender.clone();
    spawn_local(async move {
        if let Ok(json) = serde_json::to_string(&msg) {
            let maybe_sender = sender_rc.borrow_mut().take();
            if let Some(mut sender) = maybe_sender {
                let _ = sender.send(Message::Text(json)).await;
                *sender_rc.borrow_mut() = Some(sender);
            }
        }
    });
}

/// Close the socket by consuming the outgoing half. The receive loop then
/// ends and emits `WsEvent::Closed`.
pub fn close(sender: &WsSender) {
    if let Some(mut sink) = sender.borrow_mut().take() {
        spawn_local(async move {
            let _ = sink.close().await;
        });
    }
}
