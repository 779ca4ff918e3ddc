use yew::prelude::*;

use crate::components::icons;
use crate::models::HistoryEntry;
use crate::utils::format_clock_time;

#[derive(Properties, PartialEq)]
pub struct HistoryListProps {
    pub history: Vec<HistoryEntry>,
    pub on_select: Callback<HistoryEntry>,
    pub on_clear: Callback<()>,
}

#[function_component(HistoryList)]
pub fn history_list(props: &HistoryListProps) -> Html {
    if props.history.is_empty() {
        return html! {};
    }

    // CSS for this specific component
    let css = r#"
        .history { margin-top: 32px; }
        .history-head { display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px; }
        .history-head h3 { margin: 0; font-size: 0.9rem; display: flex; align-items: center; gap: 8px; }
        .history-clear { border: none; background: none; font-size: 0.75rem; color: var(--text-secondary); cursor: pointer; }
        .history-clear:hover { color: var(--danger-color); }
        .history-item { padding: 12px; margin-bottom: 10px; background: var(--bg-panel); border: 1px solid var(--border-color); border-radius: 8px; cursor: pointer; transition: all 0.2s; }
        .history-item:hover { border-color: var(--accent-color); }
        .history-item .meta { display: flex; justify-content: space-between; margin-bottom: 4px; }
        .history-item .badge { font-size: 0.7rem; font-weight: 600; color: var(--accent-color); background: var(--bg-selected); padding: 2px 8px; border-radius: 999px; }
        .history-item .time { font-size: 0.7rem; color: var(--text-secondary); }
        .history-item p { margin: 0; font-size: 0.85rem; overflow: hidden; display: -webkit-box; -webkit-line-clamp: 2; -webkit-box-orient: vertical; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="history">
                <div class="history-head">
                    <h3>{ icons::history() }{ "Recent Generations" }</h3>
                    <button class="history-clear" onclick={props.on_clear.reform(|_| ())}>{ "Clear History" }</button>
                </div>
                { for props.history.iter().map(|entry| {
                    let on_select = props.on_select.clone();
                    let selected = entry.clone();

                    html! {
                        <div key={entry.id.clone()} class="history-item" onclick={Callback::from(move |_| on_select.emit(selected.clone()))}>
                            <div class="meta">
                                <span class="badge">{ entry.request.content_type.display_label() }</span>
                                <span class="time">{ format_clock_time(entry.created_at) }</span>
                            </div>
                            <p>{ entry.request.prompt.clone() }</p>
                        </div>
                    }
                })}
            </div>
        </>
    }
}
