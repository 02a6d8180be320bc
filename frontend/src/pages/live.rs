//! The live console page: run settings, transcript, composer and media
//! capture, wired to the connection exposed by [`LiveApiContext`].

use shared::{
    apply_settings, push_log, ResponseModality, SessionSettings, StreamingLog, ToolsState,
    DEFAULT_MODEL, DEFAULT_VOICE, MODELS, VOICES,
};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlVideoElement, MediaStream};
use yew::prelude::*;

use crate::components::{Composer, FieldItem, Logger, MediaButtons};
use crate::hooks::{use_local_storage, use_local_storage_or};
use crate::live_api::LiveApiContext;

/// Transcript state: a fold of log notifications through `push_log`.
#[derive(Default, PartialEq)]
struct LogHistory {
    entries: Vec<StreamingLog>,
}

impl Reducible for LogHistory {
    type Action = StreamingLog;

    fn reduce(self: Rc<Self>, action: StreamingLog) -> Rc<Self> {
        let mut entries = self.entries.clone();
        push_log(&mut entries, action);
        Rc::new(LogHistory { entries })
    }
}

#[function_component(LivePage)]
pub fn live_page() -> Html {
    let live = use_context::<LiveApiContext>().expect("LiveApiProvider missing");

    let prompt = use_local_storage::<String>("prompt");
    let model = use_local_storage_or("model", DEFAULT_MODEL.to_string());
    let output = use_local_storage::<ResponseModality>("output");
    let voice = use_local_storage_or("voice", DEFAULT_VOICE.to_string());
    let tools = use_local_storage::<ToolsState>("tools");
    let tools_pane_open = use_local_storage::<bool>("tools-pane-active");
    let prompt_pane_open = use_state(|| false);

    let messages = use_reducer(LogHistory::default);
    let video_stream = use_state(|| None::<MediaStream>);
    let video_ref = use_node_ref();

    // Log subscription scoped to the page's mounted lifetime: the guard is
    // acquired once and released by the effect's cleanup on unmount.
    {
        let live = live.clone();
        let dispatcher = messages.dispatcher();
        use_effect_with((), move |_| {
            let subscription = live.on_log(Callback::from(move |entry: StreamingLog| {
                dispatcher.dispatch(entry);
            }));
            move || drop(subscription)
        });
    }

    // Recompute and push the derived session configuration whenever the
    // connection flag or any relevant preference changes.
    {
        let live = live.clone();
        use_effect_with(
            (
                live.connected,
                prompt.value.clone(),
                model.value.clone(),
                output.value,
                voice.value.clone(),
            ),
            move |(_, prompt, model, output, voice)| {
                let settings = SessionSettings {
                    prompt: prompt.clone(),
                    model: model.clone(),
                    output: *output,
                    voice: voice.clone(),
                };
                live.set_config(apply_settings(&live.config, &settings));
            },
        );
    }

    // Bind the preview element to the active stream.
    {
        let video_ref = video_ref.clone();
        use_effect_with((*video_stream).clone(), move |stream| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_src_object(stream.as_ref());
            }
        });
    }

    let on_toggle_connection = {
        let live = live.clone();
        let video_stream = video_stream.clone();
        Callback::from(move |_: MouseEvent| {
            if live.connected {
                // Clear the preview before tearing down so no stale frame
                // survives the disconnect.
                video_stream.set(None);
                live.disconnect();
            } else {
                live.connect();
            }
        })
    };

    let on_submit = {
        let live = live.clone();
        Callback::from(move |text: String| live.send_text(text))
    };

    let on_video_stream_change = {
        let video_stream = video_stream.clone();
        Callback::from(move |stream: Option<MediaStream>| video_stream.set(stream))
    };

    let on_prompt_input = {
        let set = prompt.set.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                set.emit(input.value());
            }
        })
    };

    let on_model_change = {
        let set = model.set.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                set.emit(select.value());
            }
        })
    };

    let on_output_change = {
        let set = output.set.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                set.emit(ResponseModality::parse(&select.value()));
            }
        })
    };

    let on_voice_change = {
        let set = voice.set.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                set.emit(select.value());
            }
        })
    };

    // Each checkbox rewrites exactly one field of the tools record.
    let tools_value = tools.value;
    let tool_toggle = |update: fn(ToolsState, bool) -> ToolsState| {
        let set = tools.set.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                set.emit(update(tools_value, input.checked()));
            }
        })
    };

    let toggle_prompt_pane = {
        let prompt_pane_open = prompt_pane_open.clone();
        Callback::from(move |_: MouseEvent| prompt_pane_open.set(!*prompt_pane_open))
    };

    let toggle_tools_pane = {
        let open = tools_pane_open.value;
        let set = tools_pane_open.set.clone();
        Callback::from(move |_: MouseEvent| set.emit(!open))
    };

    html! {
        <div class="live-page">
            <header class="live-header">{ "Stream Realtime" }</header>
            <div class="live-body">
                <main class="live-main">
                    <section class="prompt-pane">
                        <button class="pane-toggle" onclick={toggle_prompt_pane}>
                            { "System Instructions" }
                        </button>
                        if *prompt_pane_open {
                            <input
                                class="prompt-input"
                                type="text"
                                placeholder="Optional tone and style instructions for the model"
                                value={prompt.value.clone()}
                                oninput={on_prompt_input}
                            />
                        }
                    </section>

                    <section class="messages">
                        <Logger entries={messages.entries.clone()} />
                    </section>

                    <div class="connection-row">
                        <button
                            class={classes!("connection-toggle", live.connected.then_some("connected"))}
                            onclick={on_toggle_connection}
                        >
                            { if live.connected { "\u{23f8} Disconnect" } else { "\u{23fb} Click me to start !" } }
                        </button>
                    </div>

                    <section class="composer-row">
                        <Composer
                            disabled={!live.connected}
                            on_submit={on_submit}
                            prefix={html! {
                                <MediaButtons
                                    on_video_stream_change={on_video_stream_change}
                                    supports_video=true
                                    disabled={!live.connected}
                                />
                            }}
                        />
                        if video_stream.is_some() {
                            <video
                                class="video-preview"
                                ref={video_ref.clone()}
                                autoplay=true
                                playsinline=true
                            />
                        }
                    </section>
                </main>

                <aside class="run-settings">
                    <div class="run-settings-title">{ "Run settings" }</div>

                    <FieldItem label="Model">
                        <select onchange={on_model_change}>
                            { for MODELS.iter().map(|(id, label)| html! {
                                <option value={*id} selected={model.value == *id}>{ *label }</option>
                            }) }
                        </select>
                    </FieldItem>

                    <FieldItem label="Output format">
                        <select onchange={on_output_change}>
                            <option value="audio" selected={output.value == ResponseModality::Audio}>{ "Audio" }</option>
                            <option value="text" selected={output.value == ResponseModality::Text}>{ "Text" }</option>
                        </select>
                    </FieldItem>

                    <FieldItem label="Voice">
                        <select onchange={on_voice_change}>
                            { for VOICES.iter().map(|name| html! {
                                <option value={*name} selected={voice.value == *name}>{ *name }</option>
                            }) }
                        </select>
                    </FieldItem>

                    <section class="tools-pane">
                        <button class="pane-toggle" onclick={toggle_tools_pane}>
                            { "Tools" }
                        </button>
                        if tools_pane_open.value {
                            <div class="tools-list">
                                <FieldItem label="Code Execution">
                                    <input
                                        type="checkbox"
                                        checked={tools_value.code_execution}
                                        onchange={tool_toggle(|tools, checked| ToolsState { code_execution: checked, ..tools })}
                                    />
                                </FieldItem>
                                <FieldItem label="Function calling">
                                    <input
                                        type="checkbox"
                                        checked={tools_value.function_calling}
                                        onchange={tool_toggle(|tools, checked| ToolsState { function_calling: checked, ..tools })}
                                    />
                                </FieldItem>
                                <FieldItem label="Automatic Function Response">
                                    <input
                                        type="checkbox"
                                        checked={tools_value.automatic_function_response}
                                        onchange={tool_toggle(|tools, checked| ToolsState { automatic_function_response: checked, ..tools })}
                                    />
                                </FieldItem>
                                <FieldItem label="Grounding">
                                    <input
                                        type="checkbox"
                                        checked={tools_value.grounding}
                                        onchange={tool_toggle(|tools, checked| ToolsState { grounding: checked, ..tools })}
                                    />
                                </FieldItem>
                            </div>
                        }
                    </section>
                </aside>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_history_folds_through_push_log() {
        let history = Rc::new(LogHistory::default());
        let history = history.reduce(StreamingLog::new("server.audio", "chunk"));
        let history = history.reduce(StreamingLog::new("server.audio", "chunk"));
        let history = history.reduce(StreamingLog::new("client.send", "hi"));
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[0].count, Some(1));
        assert_eq!(history.entries[1].count, None);
    }
}
