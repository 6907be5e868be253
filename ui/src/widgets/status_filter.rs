use egui::{Response, Ui};
use rolodex_business::{UserStatus, ViewEvent, dispatch_view_event};
use rolodex_states::StateCtx;

/// One button per status; each requests the users with that exact status.
pub fn status_filter(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let mut picked = None;

    let response = ui
        .horizontal(|ui| {
            ui.strong("Filter:");
            for status in UserStatus::ALL {
                if ui.button(status.as_str()).clicked() {
                    picked = Some(status);
                }
            }
        })
        .response;

    if let Some(status) = picked {
        dispatch_view_event(state_ctx, ViewEvent::FilterSelected(status));
    }
    response
}
