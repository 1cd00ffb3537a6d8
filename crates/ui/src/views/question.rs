use dioxus::prelude::*;

use crate::vm::ChoiceVm;

#[component]
pub fn QuestionCard(
    question_html: String,
    choices: Vec<ChoiceVm>,
    on_answer: EventHandler<usize>,
) -> Element {
    rsx! {
        section { class: "page question",
            h2 { class: "question__text", dangerous_inner_html: "{question_html}" }
            ol { class: "question__choices",
                for choice in choices {
                    li { key: "{choice.slot}",
                        button {
                            class: "choice",
                            id: "choice-{choice.slot}",
                            r#type: "button",
                            onclick: move |_| on_answer.call(choice.slot),
                            span { dangerous_inner_html: "{choice.html}" }
                        }
                    }
                }
            }
        }
    }
}
