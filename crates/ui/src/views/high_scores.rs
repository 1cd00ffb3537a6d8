use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_high_score_rows;

#[component]
pub fn HighScoresPanel(on_back: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let high_scores = ctx.high_scores();

    let mut resource = use_resource({
        let high_scores = high_scores.clone();
        move || {
            let high_scores = high_scores.clone();
            async move {
                let entries = high_scores.list().await.map_err(|err| {
                    tracing::warn!(%err, "loading high scores failed");
                    ViewError::Unknown
                })?;
                Ok::<_, ViewError>(map_high_score_rows(&entries))
            }
        }
    });
    let state = view_state_from_resource(&resource);
    let mut clear_error = use_signal(|| None::<ViewError>);

    let clear = move |_: MouseEvent| {
        let high_scores = high_scores.clone();
        spawn(async move {
            match high_scores.clear().await {
                Ok(()) => {
                    clear_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    tracing::warn!(%err, "clearing high scores failed");
                    clear_error.set(Some(ViewError::Unknown));
                }
            }
        });
    };

    rsx! {
        section { class: "page high-scores",
            h2 { "High scores" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "high-scores__empty", "No high scores yet." }
                    } else {
                        ol { class: "high-scores__list",
                            for row in rows {
                                li { key: "{row.rank}", "{row.label}" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            if let Some(err) = clear_error() {
                p { class: "error", "{err.message()}" }
            }

            div { class: "high-scores__actions",
                button {
                    id: "high-scores-back",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "Go back"
                }
                button {
                    id: "high-scores-clear",
                    r#type: "button",
                    onclick: clear,
                    "Clear high scores"
                }
            }
        }
    }
}
