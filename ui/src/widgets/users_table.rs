//! Table of the current page of users.

use egui::{Align, Layout, Response, Ui};
use egui_extras::{Column, TableBuilder};
use rolodex_business::{SortField, page_window};
use rolodex_states::StateCtx;

pub const EMPTY_TABLE_TEXT: &str = "data not found";

const ROW_HEIGHT: f32 = 22.0;

pub fn users_table(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    let window = page_window(state_ctx);

    ui.vertical(|ui| {
        TableBuilder::new(ui)
            .id_salt("users_table")
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(
                Column::auto().at_least(90.0).resizable(true),
                SortField::ALL.len(),
            )
            .header(ROW_HEIGHT, |mut header| {
                for field in SortField::ALL {
                    header.col(|ui| {
                        ui.strong(field.label());
                    });
                }
            })
            .body(|mut body| {
                for user in window.rows() {
                    body.row(ROW_HEIGHT, |mut row| {
                        for field in SortField::ALL {
                            row.col(|ui| {
                                ui.label(user.field(field));
                            });
                        }
                    });
                }
            });

        if window.is_empty() {
            ui.label(EMPTY_TABLE_TEXT);
        }
    })
    .response
}
