use egui::{Button, Response, Ui};
use rolodex_business::{ViewEvent, dispatch_view_event, page_window};
use rolodex_states::StateCtx;

/// One button per page, `1..=total_pages`, between `<` and `>`. There is
/// always at least one page button.
pub fn pagination(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let (pages, current, has_prev, has_next) = {
        let window = page_window(state_ctx);
        (
            window.page_numbers(),
            window.current_page(),
            window.has_prev(),
            window.has_next(),
        )
    };
    let mut clicked = None;

    let response = ui
        .horizontal(|ui| {
            if ui.add_enabled(has_prev, Button::new("<")).clicked() {
                clicked = Some(current - 1);
            }
            for page in pages {
                if ui
                    .selectable_label(page == current, page.to_string())
                    .clicked()
                {
                    clicked = Some(page);
                }
            }
            if ui.add_enabled(has_next, Button::new(">")).clicked() {
                clicked = Some(current + 1);
            }
        })
        .response;

    if let Some(page) = clicked {
        dispatch_view_event(state_ctx, ViewEvent::GoToPage(page));
    }
    response
}
