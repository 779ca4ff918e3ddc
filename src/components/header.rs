use yew::prelude::*;

use crate::components::icons;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub is_dark: bool,
    pub on_toggle_theme: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let css = r#"
        .header { padding: 0 24px; border-bottom: 1px solid var(--border-color); display: flex; justify-content: space-between; align-items: center; height: 64px; background: var(--bg-panel); }
        .header h1 { font-size: 1.1rem; margin: 0; font-weight: 700; }
        .header .subtitle { font-size: 0.75rem; color: var(--text-secondary); }
        .header .status { font-size: 0.75rem; color: var(--accent-color); margin-right: 12px; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <header class="header">
                <div>
                    <h1>{ "AI Content Generator" }</h1>
                    <span class="subtitle">{ "Powered by Gemini" }</span>
                </div>
                <div style="display: flex; align-items: center;">
                    <span class="status">{ "System Operational" }</span>
                    <button class="btn-icon" onclick={props.on_toggle_theme.reform(|_| ())} aria-label="Toggle Dark Mode">
                        { if props.is_dark { icons::sun() } else { icons::moon() } }
                    </button>
                </div>
            </header>
        </>
    }
}
