use super::*;

impl QuizApp {
    /// Botón "Clear": deja el formulario como recién renderizado.
    pub fn clear_answers(&mut self) {
        for card in &mut self.cards {
            card.answer = match &card.answer {
                AnswerInput::Choice(_) => AnswerInput::Choice(None),
                AnswerInput::Text(_) => AnswerInput::Text(String::new()),
            };
            card.unanswered = false;
            card.result = None;
        }

        self.feedback_message = FEEDBACK_PLACEHOLDER.to_string();
        self.pending_scroll = None;
        self.phase = SubmitPhase::Idle;
    }
}
