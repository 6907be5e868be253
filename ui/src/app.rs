use std::time::Duration;

use rolodex_business::{UsersCompute, ViewEvent, dispatch_view_event};

use crate::{state::State, widgets};

pub const HEADING: &str = "Search, Filter, Sort and pagination";

pub struct RolodexApp {
    state: State,
    started: bool,
}

impl RolodexApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            started: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for RolodexApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply finished fetches before anything reads them
        self.state.ctx.sync_computes();

        if !self.started {
            self.started = true;
            dispatch_view_event(&mut self.state.ctx, ViewEvent::Startup);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            widgets::search_bar(&mut self.state.ctx, ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(HEADING);
                if self
                    .state
                    .ctx
                    .cached::<UsersCompute>()
                    .is_some_and(UsersCompute::is_loading)
                {
                    ui.spinner();
                }
            });
            ui.separator();

            widgets::users_table(&self.state.ctx, ui);
            ui.add_space(8.0);
            widgets::pagination(&mut self.state.ctx, ui);
            ui.add_space(8.0);
            widgets::sort_select(&mut self.state.ctx, ui);
            widgets::status_filter(&mut self.state.ctx, ui);
        });

        // Run what this frame enqueued
        self.state.ctx.flush_commands();

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
