use std::time::Duration;
use yew::platform::{spawn_local, time::sleep};
use yew::prelude::*;

use crate::components::icons;
use crate::utils::render_markdown;

const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Properties, PartialEq)]
pub struct OutputDisplayProps {
    pub content: Option<String>,
    pub is_loading: bool,
    pub on_copy: Callback<()>,
    pub on_regenerate: Callback<()>,
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[function_component(OutputDisplay)]
pub fn output_display(props: &OutputDisplayProps) -> Html {
    let copied = use_state(|| false);

    let on_copy = {
        let copied = copied.clone();
        let on_copy = props.on_copy.clone();
        Callback::from(move |_| {
            on_copy.emit(());
            copied.set(true);
            let copied = copied.clone();
            spawn_local(async move {
                sleep(COPIED_FEEDBACK).await;
                copied.set(false);
            });
        })
    };

    let css = r#"
        .output-panel { background: var(--bg-panel); border: 1px solid var(--border-color); border-radius: 16px; min-height: 400px; display: flex; flex-direction: column; }
        .output-empty { flex-grow: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 40px; text-align: center; color: var(--text-secondary); }
        .output-bar { display: flex; justify-content: space-between; align-items: center; padding: 10px 16px; border-bottom: 1px solid var(--border-color); background: var(--bg-muted); border-radius: 16px 16px 0 0; }
        .output-bar .words { font-size: 0.75rem; color: var(--text-secondary); }
        .output-body { padding: 24px; overflow-y: auto; }
        .skeleton { height: 12px; border-radius: 6px; background: var(--bg-muted); margin-bottom: 12px; animation: pulse 1.5s infinite; }
        .btn.copied { color: var(--accent-color); border-color: var(--accent-color); }
        @keyframes pulse { 50% { opacity: 0.5; } }
        @keyframes spin { to { transform: rotate(360deg); } }
        .spin { display: inline-flex; animation: spin 1s linear infinite; }
    "#;

    let body = if props.is_loading {
        html! {
            <div class="output-empty">
                <span class="spin">{ icons::refresh(32) }</span>
                <p>{ "Crafting your content..." }</p>
                <div style="width: 80%;">
                    <div class="skeleton" style="width: 75%;"></div>
                    <div class="skeleton"></div>
                    <div class="skeleton" style="width: 85%;"></div>
                </div>
            </div>
        }
    } else if let Some(content) = &props.content {
        html! {
            <>
                <div class="output-bar">
                    <span class="words">{ format!("{} words", word_count(content)) }</span>
                    <div style="display: flex; gap: 8px;">
                        <button class="btn-icon" onclick={props.on_regenerate.reform(|_| ())} title="Regenerate with same settings">
                            { icons::refresh(16) }
                        </button>
                        <button class={classes!("btn", (*copied).then_some("copied"))} onclick={on_copy}>
                            { if *copied { icons::check(16) } else { icons::copy() } }
                            { if *copied { " Copied!" } else { " Copy" } }
                        </button>
                    </div>
                </div>
                <div class="output-body">{ render_markdown(content) }</div>
            </>
        }
    } else {
        html! {
            <div class="output-empty">
                { icons::sparkles() }
                <h3>{ "Ready to Create" }</h3>
                <p>{ "Select a content type and enter your prompt to generate high-quality AI content instantly." }</p>
            </div>
        }
    };

    html! {
        <>
            <style>{ css }</style>
            <div class="output-panel">{ body }</div>
        </>
    }
}
