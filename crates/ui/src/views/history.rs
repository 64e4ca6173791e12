use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryItemVm, HistoryVm, map_history};

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let resource = use_resource(move || {
        let history = history.clone();
        async move {
            let list = history.list().await;
            Ok::<_, ViewError>(map_history(&list))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(HistoryVm { items, warning }) => rsx! {
                    if let Some(warning) = warning {
                        p { class: "warning", "{warning}" }
                    }
                    if items.is_empty() {
                        p { "No attempts yet." }
                    } else {
                        ul { class: "history",
                            for item in items {
                                AttemptRow { item }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn AttemptRow(item: HistoryItemVm) -> Element {
    rsx! {
        li {
            span { class: "history-date", "{item.when}" }
            span { class: "history-exam", " {item.subject} / {item.exam} " }
            strong { class: "history-score", "{item.score}" }
        }
    }
}
