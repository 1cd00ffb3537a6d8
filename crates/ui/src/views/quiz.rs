use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use services::TimerFired;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::context::AppContext;
use crate::scheduler::TokioScheduler;
use crate::views::{HighScoresPanel, QuestionCard, ResultsPanel, WelcomePanel};
use crate::vm::{QuizBodyVm, QuizIntent, QuizVm, needs_leave_confirmation};

type TimerInbox = Rc<RefCell<Option<UnboundedReceiver<TimerFired>>>>;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();

    let inbox: TimerInbox = use_hook(|| Rc::new(RefCell::new(None)));
    let quiz = use_signal({
        let inbox = Rc::clone(&inbox);
        let bank = ctx.question_bank();
        let rules = ctx.quiz_rules();
        move || {
            let (scheduler, receiver) = TokioScheduler::channel();
            *inbox.borrow_mut() = Some(receiver);
            QuizVm::new(bank, rules, scheduler)
        }
    });
    let mut confirm_leave = use_signal(|| false);

    // Timer events are applied one at a time, in firing order.
    use_future(move || {
        let inbox = Rc::clone(&inbox);
        async move {
            let Some(mut receiver) = inbox.borrow_mut().take() else {
                return;
            };
            let mut quiz = quiz;
            while let Some(fired) = receiver.recv().await {
                quiz.write().handle_timer(fired);
            }
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut quiz = quiz;
        if let Err(err) = quiz.write().apply(intent) {
            tracing::debug!(?intent, %err, "quiz action rejected");
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, quiz);
            }
        }
    }

    let request_high_scores = move |_: MouseEvent| {
        if needs_leave_confirmation(quiz.read().phase()) {
            confirm_leave.set(true);
        } else {
            dispatch.call(QuizIntent::ViewHighScores);
        }
    };

    let screen = quiz.read().screen();

    rsx! {
        div { class: "quiz",
            header { class: "quiz__header",
                if screen.show_high_scores_link {
                    button {
                        class: "link",
                        id: "view-high-scores",
                        r#type: "button",
                        onclick: request_high_scores,
                        "View high scores"
                    }
                }
                if let Some(label) = screen.timer_label.clone() {
                    span { class: "quiz__timer", "{label}" }
                }
            }

            main { class: "quiz__body",
                match screen.body.clone() {
                    QuizBodyVm::Welcome { title, rules } => rsx! {
                        WelcomePanel {
                            title,
                            rules,
                            on_start: move |()| dispatch.call(QuizIntent::Start),
                        }
                    },
                    QuizBodyVm::Question { question_html, choices } => rsx! {
                        QuestionCard {
                            question_html,
                            choices,
                            on_answer: move |slot: usize| dispatch.call(QuizIntent::Answer(slot)),
                        }
                    },
                    QuizBodyVm::Results { score, score_label } => rsx! {
                        ResultsPanel {
                            score,
                            score_label,
                            on_saved: move |()| dispatch.call(QuizIntent::ViewHighScores),
                        }
                    },
                    QuizBodyVm::HighScores => rsx! {
                        HighScoresPanel {
                            on_back: move |()| dispatch.call(QuizIntent::GoHome),
                        }
                    },
                }
            }

            if let Some(message) = screen.feedback.clone() {
                footer { class: "quiz__feedback", "{message}" }
            }

            if confirm_leave() {
                div { class: "modal",
                    div { class: "modal__panel",
                        p { "Leave the current quiz? Your progress will be lost." }
                        div { class: "modal__actions",
                            button {
                                id: "leave-cancel",
                                r#type: "button",
                                onclick: move |_| confirm_leave.set(false),
                                "Stay"
                            }
                            button {
                                class: "primary",
                                id: "leave-confirm",
                                r#type: "button",
                                onclick: move |_| {
                                    confirm_leave.set(false);
                                    dispatch.call(QuizIntent::ViewHighScores);
                                },
                                "Leave"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    quiz: Rc<RefCell<Option<Signal<QuizVm<TokioScheduler>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        quiz: Signal<QuizVm<TokioScheduler>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.quiz.borrow_mut() = Some(quiz);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn quiz(&self) -> Signal<QuizVm<TokioScheduler>> {
        (*self.quiz.borrow()).expect("quiz signal registered")
    }
}
