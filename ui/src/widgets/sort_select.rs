use egui::{ComboBox, Response, Ui};
use rolodex_business::{SortField, ViewEvent, ViewState, dispatch_view_event};
use rolodex_states::StateCtx;

pub const SORT_PLACEHOLDER: &str = "Please select a value";

/// Drop-down of sortable fields. Picking one requests the sorted list.
pub fn sort_select(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let selected = state_ctx.state::<ViewState>().sort_field;
    let mut choice = None;

    let response = ui
        .horizontal(|ui| {
            ui.label("Sort By:");
            ComboBox::from_id_salt("sort_field")
                .selected_text(selected.map_or(SORT_PLACEHOLDER, SortField::as_str))
                .show_ui(ui, |ui| {
                    for field in SortField::ALL {
                        if ui
                            .selectable_label(selected == Some(field), field.as_str())
                            .clicked()
                        {
                            choice = Some(field);
                        }
                    }
                });
        })
        .response;

    if let Some(field) = choice {
        dispatch_view_event(state_ctx, ViewEvent::SortSelected(field));
    }
    response
}

#[cfg(test)]
mod sort_select_test {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use rolodex_business::{SortField, ViewState};

    use crate::state::State;

    #[test]
    fn test_placeholder_until_a_field_is_picked() {
        let mut harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                super::sort_select(&mut state.ctx, ui);
            },
            State::test("http://api.test".to_owned()),
        );
        harness.run();
        assert!(harness.query_by_label(super::SORT_PLACEHOLDER).is_some());

        harness
            .state_mut()
            .ctx
            .update::<ViewState>(|view| view.sort_field = Some(SortField::Phone));
        harness.run();
        assert!(harness.query_by_label(super::SORT_PLACEHOLDER).is_none());
        assert!(harness.query_by_label("phone").is_some());
    }
}
