//! Transcript pane: passive list rendering of the streaming log.

use shared::StreamingLog;
use yew::prelude::*;

use crate::utils::format_clock;

#[derive(Properties, PartialEq)]
pub struct LoggerProps {
    pub entries: Vec<StreamingLog>,
}

fn entry_class(entry: &StreamingLog) -> &'static str {
    if entry.kind.starts_with("server") {
        "log-entry server"
    } else if entry.kind == "client.error" {
        "log-entry error"
    } else {
        "log-entry client"
    }
}

fn render_entry(entry: &StreamingLog) -> Html {
    html! {
        <li class={entry_class(entry)}>
            <span class="log-time">{ format_clock(&entry.date) }</span>
            <span class="log-kind">{ &entry.kind }</span>
            <span class="log-message">{ &entry.message }</span>
            if let Some(count) = entry.count {
                <span class="log-count">{ format!("\u{d7}{count}") }</span>
            }
        </li>
    }
}

#[function_component(Logger)]
pub fn logger(props: &LoggerProps) -> Html {
    html! {
        <ul class="logger">
            { for props.entries.iter().map(render_entry) }
        </ul>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_class_by_kind() {
        assert_eq!(
            entry_class(&StreamingLog::new("server.content", "x")),
            "log-entry server"
        );
        assert_eq!(
            entry_class(&StreamingLog::new("client.send", "x")),
            "log-entry client"
        );
        assert_eq!(
            entry_class(&StreamingLog::new("client.error", "x")),
            "log-entry error"
        );
    }
}
