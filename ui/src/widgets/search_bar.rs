//! Search box with Search and Reset buttons.
//!
//! Typing only updates the view state; the request goes out on the Search
//! button or Enter.

use egui::{Key, Response, TextEdit, Ui};
use rolodex_business::{ViewEvent, ViewState, dispatch_view_event};
use rolodex_states::StateCtx;

pub const SEARCH_HINT: &str = "Search user's name";

pub fn search_bar(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let mut text = state_ctx.state::<ViewState>().search_text.clone();
    let mut events = Vec::new();

    let response = ui
        .horizontal(|ui| {
            let edit = ui.add(
                TextEdit::singleline(&mut text)
                    .id_salt("search_text")
                    .hint_text(SEARCH_HINT),
            );
            if edit.changed() {
                events.push(ViewEvent::SearchTextChanged(text.clone()));
            }
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if ui.button("Search").clicked() || entered {
                events.push(ViewEvent::SubmitSearch);
            }
            if ui.button("Reset").clicked() {
                events.push(ViewEvent::Reset);
            }
        })
        .response;

    for event in events {
        dispatch_view_event(state_ctx, event);
    }
    response
}
