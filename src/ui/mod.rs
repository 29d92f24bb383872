pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::AppState;
use eframe::{App, Frame};
use egui::Context;
use layout::bottom_panel;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Recoge los resultados de las peticiones en vuelo antes de pintar
        #[cfg(target_arch = "wasm32")]
        {
            self.poll_quiz_load();
            self.poll_feedback_result();

            if self.state == AppState::Loading || self.is_feedback_pending() {
                ctx.request_repaint();
            }
        }

        // PANEL INFERIOR TEMA OSCURO O CLARO
        bottom_panel(ctx);

        // Dispatch por estado a las funciones en views
        match self.state {
            AppState::Loading => views::loading::ui_loading(self, ctx),
            AppState::Quiz => views::quiz::ui_quiz(self, ctx),
            AppState::LoadFailed => views::load_error::ui_load_error(self, ctx),
        }
    }
}
