use yew::prelude::*;

use crate::components::icons;
use crate::models::{ContentType, CONTENT_OPTIONS};

#[derive(Properties, PartialEq)]
pub struct ContentTypeSelectorProps {
    pub selected: ContentType,
    pub on_select: Callback<ContentType>,
    pub disabled: bool,
}

#[function_component(ContentTypeSelector)]
pub fn content_type_selector(props: &ContentTypeSelectorProps) -> Html {
    let css = r#"
        .type-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
        .type-card { position: relative; display: flex; align-items: flex-start; gap: 12px; padding: 14px; border: 1px solid var(--border-color); border-radius: 12px; background: var(--bg-panel); color: var(--text-primary); text-align: left; cursor: pointer; transition: all 0.2s; }
        .type-card:hover { border-color: var(--accent-color); }
        .type-card.selected { border-color: var(--accent-color); box-shadow: 0 0 0 1px var(--accent-color); background: var(--bg-selected); }
        .type-card:disabled { opacity: 0.5; cursor: not-allowed; }
        .type-card .icon { flex-shrink: 0; padding: 8px; border-radius: 8px; background: var(--bg-muted); color: var(--text-secondary); }
        .type-card.selected .icon { background: var(--accent-color); color: white; }
        .type-card .title { display: block; font-weight: 600; font-size: 0.9rem; }
        .type-card .desc { display: block; font-size: 0.75rem; color: var(--text-secondary); margin-top: 2px; }
        .type-card .tick { position: absolute; top: 8px; right: 8px; color: var(--accent-color); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div>
                <label class="form-label">{ "1. Select Content Type" }</label>
                <div class="type-grid">
                    { for CONTENT_OPTIONS.into_iter().map(|option| {
                        let is_selected = option.id == props.selected;
                        let class = if is_selected { "type-card selected" } else { "type-card" };
                        let id = option.id;
                        let on_select = props.on_select.clone();

                        html! {
                            <button class={class} disabled={props.disabled} onclick={Callback::from(move |_| on_select.emit(id.clone()))}>
                                <div class="icon">{ icons::option_icon(option.icon) }</div>
                                <div>
                                    <span class="title">{ option.label }</span>
                                    <span class="desc">{ option.description }</span>
                                </div>
                                if is_selected {
                                    <div class="tick">{ icons::check(16) }</div>
                                }
                            </button>
                        }
                    })}
                </div>
            </div>
        </>
    }
}
