//! Text composer: pending outgoing message plus submit handling.

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ComposerProps {
    /// Emitted once per submission with the trimmed text.
    pub on_submit: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
    /// Rendered before the input (media capture buttons).
    #[prop_or_default]
    pub prefix: Html,
}

/// Gate a raw input value: only non-empty trimmed text is submittable.
pub fn prepare_submission(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[function_component(Composer)]
pub fn composer(props: &ComposerProps) -> Html {
    let text = use_state(String::new);

    let submit = {
        let text = text.clone();
        let on_submit = props.on_submit.clone();
        let disabled = props.disabled;
        Callback::from(move |()| {
            if disabled {
                return;
            }
            if let Some(message) = prepare_submission(&text) {
                on_submit.emit(message);
                text.set(String::new());
            }
        })
    };

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                text.set(input.value());
            }
        })
    };

    let onkeydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                submit.emit(());
            }
        })
    };

    let onclick = {
        let submit = submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(()))
    };

    html! {
        <div class="composer">
            { props.prefix.clone() }
            <input
                class="composer-input"
                type="text"
                placeholder="Type something..."
                value={(*text).clone()}
                disabled={props.disabled}
                {oninput}
                {onkeydown}
            />
            <button
                class="composer-send"
                disabled={props.disabled}
                {onclick}
                title="Send"
            >
                { "\u{27a4}" }
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_submission_trims() {
        assert_eq!(prepare_submission("  hello  "), Some("hello".to_string()));
    }

    #[test]
    fn test_prepare_submission_rejects_blank() {
        assert_eq!(prepare_submission(""), None);
        assert_eq!(prepare_submission("   \t"), None);
    }
}
