use dioxus::prelude::*;

#[component]
pub fn WelcomePanel(title: String, rules: String, on_start: EventHandler<()>) -> Element {
    rsx! {
        section { class: "page welcome",
            h1 { "{title}" }
            p { class: "welcome__rules", "{rules}" }
            button {
                class: "primary",
                id: "quiz-start",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Start Quiz"
            }
        }
    }
}
