use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Context, RichText, Spinner};

pub fn ui_loading(_app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 200.0, 400.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Loading quiz…").heading());
            ui.add_space(20.0);
            ui.add(Spinner::new());
        });
    });
}
