use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::submit_high_score;

#[component]
pub fn ResultsPanel(score: u32, score_label: String, on_saved: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let high_scores = ctx.high_scores();

    let mut initials = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        if saving() {
            return;
        }
        let high_scores = high_scores.clone();
        let value = initials.read().clone();
        saving.set(true);
        spawn(async move {
            let result = submit_high_score(&high_scores, &value, score).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    error.set(None);
                    on_saved.call(());
                }
                Err(message) => error.set(Some(message)),
            }
        });
    };

    rsx! {
        section { class: "page results",
            h2 { "All done!" }
            p { class: "results__score", "{score_label}" }
            div { class: "results__form",
                label { r#for: "initials", "Enter initials:" }
                input {
                    id: "initials",
                    r#type: "text",
                    value: "{initials}",
                    oninput: move |evt| initials.set(evt.value()),
                }
                button {
                    class: "primary",
                    id: "initials-submit",
                    r#type: "button",
                    disabled: saving(),
                    onclick: submit,
                    "Submit"
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
        }
    }
}
