//! Labeled row for the run-settings panel.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldItemProps {
    pub label: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(FieldItem)]
pub fn field_item(props: &FieldItemProps) -> Html {
    html! {
        <div class="field-item">
            <label class="field-item-label">{ &props.label }</label>
            <div class="field-item-control">{ props.children.clone() }</div>
        </div>
    }
}
