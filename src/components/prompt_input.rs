use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::components::icons;
use crate::models::MAX_CHAR_LIMIT;

#[derive(Properties, PartialEq)]
pub struct PromptInputProps {
    pub value: String,
    pub on_change: Callback<String>,
    pub on_clear: Callback<()>,
    pub disabled: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CounterLevel {
    Normal,
    NearLimit,
    AtLimit,
}

pub fn counter_level(char_count: usize) -> CounterLevel {
    if char_count >= MAX_CHAR_LIMIT {
        CounterLevel::AtLimit
    } else if char_count * 10 > MAX_CHAR_LIMIT * 9 {
        CounterLevel::NearLimit
    } else {
        CounterLevel::Normal
    }
}

#[function_component(PromptInput)]
pub fn prompt_input(props: &PromptInputProps) -> Html {
    let char_count = props.value.chars().count();
    let counter_class = match counter_level(char_count) {
        CounterLevel::AtLimit => "counter at-limit",
        CounterLevel::NearLimit => "counter near-limit",
        CounterLevel::Normal => "counter",
    };

    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let value = input.value();
            if value.chars().count() <= MAX_CHAR_LIMIT {
                on_change.emit(value);
            }
        })
    };

    let css = r#"
        .prompt-head { display: flex; justify-content: space-between; align-items: center; }
        .prompt-clear { border: none; background: none; color: var(--text-secondary); font-size: 0.75rem; cursor: pointer; display: flex; align-items: center; gap: 4px; }
        .prompt-clear:hover { color: var(--danger-color); }
        .prompt-box { position: relative; }
        .prompt-box textarea { height: 128px; resize: none; padding: 14px; border-radius: 12px; }
        .counter { position: absolute; bottom: 20px; right: 12px; font-size: 0.75rem; color: var(--text-secondary); }
        .counter.near-limit { color: #f59e0b; }
        .counter.at-limit { color: var(--danger-color); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div>
                <div class="prompt-head">
                    <label class="form-label">{ "2. Describe Your Topic" }</label>
                    if !props.value.is_empty() && !props.disabled {
                        <button class="prompt-clear" onclick={props.on_clear.reform(|_| ())}>
                            { icons::close(12) }{ "Clear" }
                        </button>
                    }
                </div>
                <div class="prompt-box">
                    <textarea
                        class="form-textarea"
                        value={props.value.clone()}
                        oninput={on_input}
                        disabled={props.disabled}
                        maxlength={MAX_CHAR_LIMIT.to_string()}
                        placeholder="E.g., A sustainable coffee brand launching a new cold brew line..."
                    />
                    <div class={counter_class}>
                        <span>{ char_count.to_string() }</span>
                        <span>{ format!(" / {}", MAX_CHAR_LIMIT) }</span>
                    </div>
                </div>
            </div>
        </>
    }
}
