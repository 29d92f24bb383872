use crate::QuizApp;
use crate::app::view_models::{self, UNANSWERED_COLOR};
use crate::app::{AnswerInput, QuestionCard};
use crate::model::{Question, SubmitPhase};
use crate::ui::layout::two_button_row;
use egui::{Align, CentralPanel, Context, RichText, ScrollArea, TextEdit};

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        let max_width = 650.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        egui::Frame::default()
            .fill(ui.visuals().window_fill())
            .inner_margin(egui::Margin::symmetric(24, 16))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(view_models::display_title(&app.quiz.title).to_string());
                    ui.add_space(10.0);

                    // Lista de preguntas con scroll; deja sitio a los botones y al feedback
                    let list_height = (ui.available_height() - 140.0).max(200.0);
                    let mut clicked_choice = None;
                    let mut scroll_target = app.pending_scroll.take();

                    ScrollArea::vertical()
                        .max_height(list_height)
                        .show(ui, |ui| {
                            ui.set_width(panel_width);
                            for (idx, (question, card)) in app.rows_mut().enumerate() {
                                if let Some(answer_idx) =
                                    question_block(ui, idx, question, card, &mut scroll_target)
                                {
                                    clicked_choice = Some((idx, answer_idx));
                                }
                                ui.add_space(12.0);
                            }
                        });

                    app.pending_scroll = scroll_target;
                    if let Some((question_idx, answer_idx)) = clicked_choice {
                        app.select_choice(question_idx, answer_idx);
                    }

                    ui.add_space(8.0);

                    let submitting =
                        app.phase == SubmitPhase::Submitting || app.is_feedback_pending();
                    let (submit, clear) =
                        two_button_row(ui, panel_width, "Submit", !submitting, "Clear");
                    if submit {
                        app.process_submission();
                    }
                    if clear {
                        app.clear_answers();
                    }

                    ui.add_space(8.0);
                    if !app.feedback_message.is_empty() {
                        ui.label(&app.feedback_message);
                    }
                });
            });
    });
}

/// Un bloque por pregunta: cabecera, opciones o texto libre, y marcadores.
/// Devuelve la opción clicada en este frame, si la hay.
fn question_block(
    ui: &mut egui::Ui,
    idx: usize,
    question: &Question,
    card: &mut QuestionCard,
    pending_scroll: &mut Option<usize>,
) -> Option<usize> {
    let heading = view_models::question_heading(idx, &question.text);
    let heading = if card.unanswered {
        RichText::new(heading).strong().color(UNANSWERED_COLOR)
    } else {
        RichText::new(heading).strong()
    };

    let response = ui.label(heading);
    if *pending_scroll == Some(idx) {
        response.scroll_to_me(Some(Align::Center));
        *pending_scroll = None;
    }

    let mut clicked = None;
    match &mut card.answer {
        AnswerInput::Choice(selected) => {
            for (answer_idx, answer) in question.answers.iter().enumerate() {
                if ui
                    .radio(*selected == Some(answer_idx), &answer.text)
                    .clicked()
                {
                    clicked = Some(answer_idx);
                }
            }
        }
        AnswerInput::Text(text) => {
            ui.add(TextEdit::singleline(text).hint_text("Type your answer"));
        }
    }

    if card.unanswered {
        ui.label(RichText::new("⚠ Unanswered").color(UNANSWERED_COLOR));
    }

    if let Some(result) = &card.result {
        let (marker, color) = view_models::result_marker(result);
        ui.label(RichText::new(marker).strong().color(color));
    }

    clicked
}
