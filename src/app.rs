use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use yew::prelude::*;

use crate::components::{
    content_type_selector::ContentTypeSelector, header::Header, history_list::HistoryList, icons,
    output_display::OutputDisplay, prompt_input::PromptInput,
};
use crate::config::GeneratorConfig;
use crate::models::*;
use crate::services::{
    controller::GenerationController,
    gemini::{ContentGenerator, GenerationClient},
    storage::{KeyValueStore, LocalStorage},
};

const KEY_THEME: &str = "ai_generator_theme";

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: #f9fafb;
        --bg-panel: #ffffff;
        --bg-muted: #f3f4f6;
        --bg-selected: #ecfdf5;
        --border-color: #e5e7eb;
        --text-primary: #111827;
        --text-secondary: #6b7280;
        --accent-color: #10a37f;
        --accent-hover: #1a7f64;
        --danger-color: #ef4444;
    }
    :root.dark {
        --bg-app: #111827;
        --bg-panel: #1f2937;
        --bg-muted: #374151;
        --bg-selected: rgba(16, 163, 127, 0.15);
        --border-color: #374151;
        --text-primary: #f3f4f6;
        --text-secondary: #9ca3af;
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text-primary); background: var(--bg-app); }

    .app-container { min-height: 100vh; display: flex; flex-direction: column; transition: background 0.2s; }
    .main-content { flex-grow: 1; width: 100%; max-width: 1280px; margin: 0 auto; padding: 32px 24px; }
    .layout { display: grid; grid-template-columns: 5fr 7fr; gap: 32px; }
    @media (max-width: 1024px) { .layout { grid-template-columns: 1fr; } }
    .controls { background: var(--bg-panel); border: 1px solid var(--border-color); border-radius: 16px; padding: 24px; display: flex; flex-direction: column; gap: 28px; }
    .actions { display: flex; gap: 16px; }
    .footer { text-align: center; padding: 20px; font-size: 0.8rem; color: var(--text-secondary); border-top: 1px solid var(--border-color); }

    .error-banner { margin-bottom: 24px; padding: 16px; border-radius: 8px; border: 1px solid #fecaca; background: #fef2f2; color: #b91c1c; display: flex; gap: 8px; align-items: flex-start; }
    .error-banner h3 { margin: 0; font-size: 0.9rem; }
    .error-banner p { margin: 4px 0 0; font-size: 0.9rem; }

    .btn { cursor: pointer; border: 1px solid var(--border-color); background: var(--bg-panel); padding: 8px 12px; border-radius: 6px; font-size: 0.9rem; transition: all 0.2s; color: var(--text-primary); display: inline-flex; align-items: center; gap: 6px; }
    .btn:hover { background: var(--bg-muted); }
    .btn-primary { flex: 1; justify-content: center; padding: 12px; border-radius: 12px; font-weight: 600; background: var(--accent-color); color: white; border-color: transparent; }
    .btn-primary:hover { background: var(--accent-hover); }
    .btn-primary:disabled { background: #d1d5db; cursor: not-allowed; }
    .btn-icon { border: none; background: transparent; font-size: 1.2rem; padding: 5px; color: var(--text-secondary); cursor: pointer; }
    .btn-icon:hover { background: rgba(0,0,0,0.05); color: var(--text-primary); }

    .form-label { display: block; font-size: 0.85rem; font-weight: 600; margin-bottom: 10px; color: var(--text-secondary); }
    .form-textarea { width: 100%; padding: 8px; border: 1px solid var(--border-color); border-radius: 6px; font-family: inherit; margin-bottom: 10px; background: var(--bg-panel); color: var(--text-primary); }
    .form-textarea:focus { outline: 2px solid var(--accent-color); border-color: transparent; }
    .form-textarea:disabled { background: var(--bg-muted); color: var(--text-secondary); cursor: not-allowed; }

    .markdown-body { line-height: 1.6; font-size: 1rem; }
    .markdown-body pre { background: #2d2d2d; color: #fff; padding: 15px; border-radius: 6px; overflow-x: auto; }
    .markdown-body code { background: var(--bg-muted); padding: 2px 4px; border-radius: 4px; font-family: monospace; font-size: 0.9em; }
    .markdown-body pre code { background: transparent; color: inherit; }
    .markdown-body p { margin-top: 0; margin-bottom: 1em; }
"#;

type SharedController = Rc<RefCell<GenerationController<LocalStorage>>>;

fn initial_theme() -> Theme {
    if let Some(theme) = LocalStorage.get_raw(KEY_THEME).as_deref().and_then(Theme::parse) {
        return theme;
    }
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false);
    if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let classes = root.class_list();
        let _ = if theme.is_dark() {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
    }
    if let Err(e) = LocalStorage.set_raw(KEY_THEME, theme.as_str()) {
        warn!("Failed to save theme: {}", e);
    }
}

/// Awaits the generator for a request already accepted by `begin`. The
/// controller is only borrowed before and after the remote call.
fn dispatch(
    controller: SharedController,
    client: Rc<GenerationClient>,
    request: ContentRequest,
    refresh: UseForceUpdateHandle,
) {
    refresh.force_update();
    spawn_local(async move {
        let outcome = client
            .generate(&request.content_type, &request.prompt)
            .await;
        let _ = controller.borrow_mut().finish(request, outcome);
        refresh.force_update();
    });
}

fn copy_to_clipboard(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            warn!("Clipboard write failed: {:?}", e);
        }
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let controller: SharedController = use_mut_ref(|| GenerationController::new(LocalStorage));
    let client = use_memo((), |_| GenerationClient::new(GeneratorConfig::from_env()));
    let refresh = use_force_update();
    let theme = use_state(initial_theme);

    let (session, history) = {
        let ctrl = controller.borrow();
        (ctrl.session().clone(), ctrl.history().to_vec())
    };

    // --- EFFECTS ---
    use_effect_with(*theme, |theme| apply_theme(*theme));

    // --- ACTIONS ---

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggled()))
    };

    let on_select_type = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |content_type: ContentType| {
            controller.borrow_mut().set_content_type(content_type);
            refresh.force_update();
        })
    };

    let on_prompt_change = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |prompt: String| {
            if controller.borrow_mut().set_prompt(prompt) {
                refresh.force_update();
            }
        })
    };

    let on_clear_prompt = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            controller.borrow_mut().clear_prompt();
            refresh.force_update();
        })
    };

    let on_generate = {
        let controller = controller.clone();
        let client = client.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let begun = {
                let mut ctrl = controller.borrow_mut();
                let draft = ctrl.session().draft.clone();
                ctrl.begin(draft.content_type, &draft.prompt)
            };
            match begun {
                Ok(request) => dispatch(controller.clone(), client.clone(), request, refresh.clone()),
                Err(_) => refresh.force_update(),
            }
        })
    };

    let on_regenerate = {
        let controller = controller.clone();
        let client = client.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            let begun = controller.borrow_mut().begin_regenerate();
            match begun {
                Ok(Some(request)) => {
                    dispatch(controller.clone(), client.clone(), request, refresh.clone())
                }
                Ok(None) => {}
                Err(_) => refresh.force_update(),
            }
        })
    };

    let on_clear_all = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            controller.borrow_mut().clear_all();
            refresh.force_update();
        })
    };

    let on_select_history = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |entry: HistoryEntry| {
            controller.borrow_mut().select_history(&entry);
            refresh.force_update();
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
        })
    };

    let on_clear_history = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            controller.borrow_mut().clear_history();
            refresh.force_update();
        })
    };

    let on_dismiss_error = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            controller.borrow_mut().dismiss_error();
            refresh.force_update();
        })
    };

    let on_copy = {
        let result = session.last_result.clone();
        Callback::from(move |_| {
            if let Some(text) = result.clone() {
                copy_to_clipboard(text);
            }
        })
    };

    let in_flight = session.in_flight;
    let can_generate = !in_flight && !session.draft.prompt.trim().is_empty();

    let history_list = html! {
        <HistoryList
            history={history}
            on_select={on_select_history}
            on_clear={on_clear_history}
        />
    };

    html! {
        <>
            <style>{ GLOBAL_STYLES }</style>
            <div class="app-container">
                <Header is_dark={theme.is_dark()} on_toggle_theme={on_toggle_theme} />

                <main class="main-content">
                    if let Some(error) = &session.last_error {
                        <div class="error-banner">
                            { icons::alert() }
                            <div style="flex: 1;">
                                <h3>{ "Error" }</h3>
                                <p>{ error.clone() }</p>
                            </div>
                            <button class="btn-icon" onclick={on_dismiss_error}>{ icons::close(16) }</button>
                        </div>
                    }

                    <div class="layout">
                        <div class="controls">
                            <ContentTypeSelector
                                selected={session.draft.content_type.clone()}
                                on_select={on_select_type}
                                disabled={in_flight}
                            />
                            <PromptInput
                                value={session.draft.prompt.clone()}
                                on_change={on_prompt_change}
                                on_clear={on_clear_prompt}
                                disabled={in_flight}
                            />
                            <div class="actions">
                                <button class="btn btn-primary" disabled={!can_generate} onclick={on_generate}>
                                    if in_flight {
                                        <><span class="spin">{ icons::refresh(18) }</span>{ "Generating..." }</>
                                    } else {
                                        <>{ icons::sparkles() }{ "Generate Content" }</>
                                    }
                                </button>
                                <button class="btn" disabled={in_flight} onclick={on_clear_all}>{ "Clear All" }</button>
                            </div>
                        </div>

                        <div>
                            <OutputDisplay
                                content={session.last_result.clone()}
                                is_loading={in_flight}
                                on_copy={on_copy}
                                on_regenerate={on_regenerate}
                            />
                            { history_list }
                        </div>
                    </div>
                </main>

                <footer class="footer">{ "AI Content Generator · Built with Rust, Yew and Gemini" }</footer>
            </div>
        </>
    }
}
