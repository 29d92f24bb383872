use super::QuestionResult;
use egui::Color32;

pub const CORRECT_COLOR: Color32 = Color32::from_rgb(34, 197, 94);
pub const INCORRECT_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
pub const UNANSWERED_COLOR: Color32 = Color32::from_rgb(245, 158, 11);

pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() { "Quiz" } else { title }
}

pub fn question_heading(idx: usize, text: &str) -> String {
    format!("Q{}: {}", idx + 1, text)
}

/// Texto y color del marcador de resultado bajo cada pregunta.
pub fn result_marker(result: &QuestionResult) -> (String, Color32) {
    match result {
        QuestionResult::Correct => ("✓ Correct".to_string(), CORRECT_COLOR),
        QuestionResult::Incorrect { correct_text } => (
            format!("✗ Wrong. Correct: {correct_text}"),
            INCORRECT_COLOR,
        ),
    }
}
