//! Context provider component owning the live connection.

use shared::{LiveConfig, StreamingLog};
use yew::prelude::*;

use super::websocket::{self, WsEvent, WsSender};
use super::{LiveApiContext, SessionState, Subscribers};

#[derive(Properties, PartialEq)]
pub struct LiveApiProviderProps {
    /// API key appended to the websocket URL.
    pub api_key: String,
    #[prop_or_default]
    pub children: Html,
}

fn broadcast(subscribers: &Subscribers, entry: StreamingLog) {
    for (_, callback) in subscribers.borrow().iter() {
        callback.emit(entry.clone());
    }
}

/// Owns the socket, the connected flag and the session configuration, and
/// exposes them to descendants as [`LiveApiContext`].
#[function_component(LiveApiProvider)]
pub fn live_api_provider(props: &LiveApiProviderProps) -> Html {
    let connected = use_state(|| false);
    let config = use_state(LiveConfig::default);
    let sender = use_mut_ref(|| None::<WsSender>);
    let session = use_mut_ref(SessionState::default);
    let subscribers: Subscribers = use_mut_ref(Vec::new);
    let next_subscription_id = use_mut_ref(|| 0usize);

    let on_event = {
        let connected = connected.clone();
        let sender = sender.clone();
        let session = session.clone();
        let subscribers = subscribers.clone();
        Callback::from(move |(id, event): (u64, WsEvent)| {
            if !session.borrow().accepts(id) {
                // A socket from a superseded connect attempt. Shut it down
                // instead of letting it clobber the live session.
                if let WsEvent::Opened(ws_sender) = event {
                    websocket::close(&ws_sender);
                }
                return;
            }
            match event {
                WsEvent::Opened(ws_sender) => {
                    *sender.borrow_mut() = Some(ws_sender);
                    broadcast(
                        &subscribers,
                        StreamingLog::new("client.open", "connected to Live API"),
                    );
                }
                WsEvent::SetupComplete => {
                    connected.set(true);
                    broadcast(
                        &subscribers,
                        StreamingLog::new("server.setupComplete", "setup complete"),
                    );
                }
                WsEvent::Server(msg) => {
                    broadcast(&subscribers, StreamingLog::new(msg.kind(), msg.summary()));
                }
                WsEvent::Closed => {
                    session.borrow_mut().ended(id);
                    *sender.borrow_mut() = None;
                    connected.set(false);
                    broadcast(&subscribers, StreamingLog::new("client.close", "disconnected"));
                }
                WsEvent::Error(error) => {
                    session.borrow_mut().ended(id);
                    *sender.borrow_mut() = None;
                    connected.set(false);
                    broadcast(&subscribers, StreamingLog::new("client.error", error.to_string()));
                }
            }
        })
    };

    let connect_cb = {
        let config = config.clone();
        let session = session.clone();
        let api_key = props.api_key.clone();
        let on_event = on_event.clone();
        Callback::from(move |()| {
            // begin() refuses while a session is connecting or open, so
            // repeated clicks cannot race two sockets against each other.
            let id = match session.borrow_mut().begin() {
                Some(id) => id,
                None => return,
            };
            websocket::open_session(id, api_key.clone(), (*config).clone(), on_event.clone());
        })
    };

    let disconnect_cb = {
        let connected = connected.clone();
        let sender = sender.clone();
        let session = session.clone();
        let subscribers = subscribers.clone();
        Callback::from(move |()| {
            // Supersede first so the old socket's deferred Closed cannot
            // touch a reconnect that follows.
            session.borrow_mut().supersede();
            connected.set(false);
            if let Some(ws_sender) = sender.borrow_mut().take() {
                websocket::close(&ws_sender);
                broadcast(&subscribers, StreamingLog::new("client.close", "disconnected"));
            }
        })
    };

    let send_text_cb = {
        let sender = sender.clone();
        let subscribers = subscribers.clone();
        Callback::from(move |text: String| {
            let guard = sender.borrow();
            match guard.as_ref() {
                Some(ws_sender) => {
                    websocket::send_message(ws_sender, shared::ClientMessage::user_text(text.clone()));
                    broadcast(&subscribers, StreamingLog::new("client.send", text));
                }
                None => log::warn!("dropping outgoing text: {}", shared::LiveError::NotConnected),
            }
        })
    };

    let set_config_cb = {
        let config = config.clone();
        Callback::from(move |next: LiveConfig| config.set(next))
    };

    let context = LiveApiContext {
        connected: *connected,
        config: (*config).clone(),
        set_config_cb,
        connect_cb,
        disconnect_cb,
        send_text_cb,
        subscribers,
        next_subscription_id,
    };

    html! {
        <ContextProvider<LiveApiContext> {context}>
            { props.children.clone() }
        </ContextProvider<LiveApiContext>>
    }
}
