use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Color32, Context, RichText};

// Fallo fatal: se sustituye el área del quiz, nunca se renderiza el formulario.
pub fn ui_load_error(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 200.0, 500.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!("Could not load quiz: {}", app.load_error))
                    .heading()
                    .color(Color32::LIGHT_RED),
            );
        });
    });
}
