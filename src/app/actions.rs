use super::*;
use crate::feedback::remote::SubmitError;
use crate::model::{Attempt, FeedbackResponse};

impl QuizApp {
    /// Maneja el click de "Submit": valida, construye el intento y lo envía.
    pub fn process_submission(&mut self) {
        if self.is_feedback_pending() {
            return;
        }

        let Some(attempt) = self.prepare_submission() else {
            return;
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = remote::submit_attempt(&self.api_base, &attempt);
            self.finish_submission(result);
        }

        #[cfg(target_arch = "wasm32")]
        self.start_feedback_submission(attempt);
    }

    /// Valida el formulario. Devuelve el intento listo para enviar, o `None`
    /// si quedan preguntas sin responder (marcadas, con aviso y sin red).
    pub(crate) fn prepare_submission(&mut self) -> Option<Attempt> {
        if self.phase == SubmitPhase::Submitting {
            return None;
        }

        // 1) Limpia las marcas de la validación anterior
        for card in &mut self.cards {
            card.unanswered = false;
        }

        // 2) Marca las pendientes y aborta antes de tocar la red
        let unanswered = queries::unanswered_indices(&self.cards);
        if !unanswered.is_empty() {
            for &idx in &unanswered {
                self.cards[idx].unanswered = true;
            }
            self.feedback_message = format!(
                "Please answer all questions ({} unanswered)",
                unanswered.len()
            );
            self.pending_scroll = unanswered.first().copied();
            return None;
        }

        // 3) Listo para enviar
        self.phase = SubmitPhase::Submitting;
        self.feedback_message = SUBMITTING_MESSAGE.to_string();
        Some(queries::build_attempt(&self.quiz, &self.cards))
    }

    pub(crate) fn finish_submission(&mut self, result: Result<FeedbackResponse, SubmitError>) {
        match result {
            Ok(response) => {
                self.apply_feedback_response(&response);
                self.phase = SubmitPhase::ShowingResults;
            }
            Err(err) => {
                // El detalle va solo al log; el usuario ve el mensaje fijo.
                log::warn!("feedback submission failed: {err}");
                self.feedback_message = AI_UNAVAILABLE_MESSAGE.to_string();
                self.phase = SubmitPhase::ShowingError;
            }
        }
    }

    /// Pinta el feedback global y anota cada pregunta con su resultado.
    pub fn apply_feedback_response(&mut self, response: &FeedbackResponse) {
        self.feedback_message = response
            .feedback
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| serde_json::to_string_pretty(response).unwrap_or_default());

        let Some(entries) = &response.question_feedback else {
            return;
        };

        let mut scrolled = false;
        for (position, entry) in entries.iter().enumerate() {
            let idx =
                queries::matching_question_index(&self.quiz, entry.question_id.as_deref(), position);

            let Some(card) = self.cards.get_mut(idx) else {
                continue;
            };

            if entry.is_correct {
                card.result = Some(QuestionResult::Correct);
            } else {
                card.result = Some(QuestionResult::Incorrect {
                    correct_text: queries::correct_answer_label(self.quiz.questions.get(idx), entry),
                });

                if !scrolled {
                    self.pending_scroll = Some(idx);
                    scrolled = true;
                }
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn start_feedback_submission(&mut self, attempt: Attempt) {
        let api_base = self.api_base.clone();
        let (tx, rx) = std::sync::mpsc::channel();
        self.feedback_rx = Some(rx);

        wasm_bindgen_futures::spawn_local(async move {
            let result = remote::submit_attempt(&api_base, &attempt).await;
            let _ = tx.send(result);
        });
    }

    #[cfg(target_arch = "wasm32")]
    pub fn poll_feedback_result(&mut self) {
        let maybe_result = self.feedback_rx.as_ref().and_then(|rx| rx.try_recv().ok());

        if let Some(result) = maybe_result {
            self.feedback_rx = None;
            self.finish_submission(result);
        }
    }

    pub fn is_feedback_pending(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.feedback_rx.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    /// Selecciona una opción y quita el aviso de sin responder de esa pregunta.
    pub fn select_choice(&mut self, question_idx: usize, answer_idx: usize) {
        if let Some(card) = self.cards.get_mut(question_idx) {
            card.answer = AnswerInput::Choice(Some(answer_idx));
            card.unanswered = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::sample_quiz;

    fn app_with_sample() -> QuizApp {
        QuizApp::from_quiz(sample_quiz(), String::new())
    }

    fn answer_all(app: &mut QuizApp) {
        app.cards[0].answer = AnswerInput::Choice(Some(1));
        app.cards[1].answer = AnswerInput::Choice(Some(2));
        app.cards[2].answer = AnswerInput::Choice(Some(2));
        app.cards[3].answer = AnswerInput::Text("total momentum does not change".into());
    }

    fn capitals_quiz() -> Quiz {
        serde_json::from_str(
            r#"{
                "title": "Capitals",
                "questions": [
                    {
                        "id": "q1",
                        "text": "Capital of France?",
                        "answers": [{"text": "Berlin"}, {"text": "Madrid"}, {"text": "Paris"}],
                        "correct_answer": 2
                    },
                    {
                        "id": "q2",
                        "text": "Capital of Italy?",
                        "answers": [{"text": "Rome"}, {"text": "Milan"}],
                        "correct_answer": 0
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn unanswered_questions_abort_the_submission() {
        let mut app = app_with_sample();
        app.cards[0].answer = AnswerInput::Choice(Some(1));

        assert!(app.prepare_submission().is_none());
        assert_eq!(app.phase, SubmitPhase::Idle);
        assert_eq!(
            app.feedback_message,
            "Please answer all questions (3 unanswered)"
        );
        assert!(!app.cards[0].unanswered);
        assert!(app.cards[1].unanswered);
        assert!(app.cards[2].unanswered);
        assert!(app.cards[3].unanswered);
        // scroll a la primera pendiente
        assert_eq!(app.pending_scroll, Some(1));
    }

    #[test]
    fn complete_form_submits_and_clears_stale_markers() {
        let mut app = app_with_sample();
        answer_all(&mut app);
        app.cards[2].unanswered = true; // marca vieja de un intento anterior

        let attempt = app.prepare_submission().expect("complete form submits");

        assert!(app.cards.iter().all(|c| !c.unanswered));
        assert_eq!(app.phase, SubmitPhase::Submitting);
        assert_eq!(app.feedback_message, SUBMITTING_MESSAGE);
        assert_eq!(attempt.questions.len(), 4);
    }

    #[test]
    fn second_submission_cannot_start_while_one_is_in_flight() {
        let mut app = app_with_sample();
        answer_all(&mut app);

        assert!(app.prepare_submission().is_some());
        assert!(app.prepare_submission().is_none());
    }

    #[test]
    fn failed_submission_shows_the_fixed_message_and_allows_retry() {
        let mut app = app_with_sample();
        answer_all(&mut app);
        app.prepare_submission().unwrap();

        app.finish_submission(Err(SubmitError::Status(503)));

        assert_eq!(app.feedback_message, AI_UNAVAILABLE_MESSAGE);
        assert_eq!(app.phase, SubmitPhase::ShowingError);
        assert!(app.prepare_submission().is_some());
    }

    #[test]
    fn overall_feedback_and_correct_marker_follow_the_id_match() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        let response: FeedbackResponse = serde_json::from_str(
            r#"{"feedback": "Good job", "question_feedback": [{"question_id": "q1", "is_correct": true}]}"#,
        )
        .unwrap();

        app.apply_feedback_response(&response);

        assert_eq!(app.feedback_message, "Good job");
        assert_eq!(app.cards[0].result, Some(QuestionResult::Correct));
        assert_eq!(app.cards[1].result, None);
        assert_eq!(app.pending_scroll, None);
    }

    #[test]
    fn incorrect_entries_resolve_option_text_and_scroll_to_the_first() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        let response: FeedbackResponse = serde_json::from_str(
            r#"{
                "feedback": "Almost",
                "question_feedback": [
                    {"question_id": "q1", "is_correct": false, "correct_answer_index": 2},
                    {"question_id": "q2", "is_correct": false, "correct_answer_index": 0}
                ]
            }"#,
        )
        .unwrap();

        app.apply_feedback_response(&response);

        assert_eq!(
            app.cards[0].result,
            Some(QuestionResult::Incorrect {
                correct_text: "Paris".into()
            })
        );
        assert_eq!(
            app.cards[1].result,
            Some(QuestionResult::Incorrect {
                correct_text: "Rome".into()
            })
        );
        assert_eq!(app.pending_scroll, Some(0));
    }

    #[test]
    fn unknown_id_falls_back_to_the_entry_position() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        let response: FeedbackResponse = serde_json::from_str(
            r#"{
                "feedback": "ok",
                "question_feedback": [
                    {"question_id": "missing", "is_correct": true},
                    {"question_id": "also-missing", "is_correct": true}
                ]
            }"#,
        )
        .unwrap();

        app.apply_feedback_response(&response);

        assert_eq!(app.cards[0].result, Some(QuestionResult::Correct));
        assert_eq!(app.cards[1].result, Some(QuestionResult::Correct));
    }

    #[test]
    fn new_feedback_replaces_the_previous_marker() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        app.cards[0].result = Some(QuestionResult::Incorrect {
            correct_text: "Paris".into(),
        });

        let response: FeedbackResponse = serde_json::from_str(
            r#"{"feedback": "Better", "question_feedback": [{"question_id": "q1", "is_correct": true}]}"#,
        )
        .unwrap();
        app.apply_feedback_response(&response);

        assert_eq!(app.cards[0].result, Some(QuestionResult::Correct));
    }

    #[test]
    fn missing_overall_feedback_falls_back_to_the_raw_dump() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        let response: FeedbackResponse =
            serde_json::from_str(r#"{"overall_score": 2, "total_questions": 4}"#).unwrap();

        app.apply_feedback_response(&response);

        assert!(app.feedback_message.contains("\"overall_score\": 2"));
        assert!(app.feedback_message.contains("\"total_questions\": 4"));
    }

    #[test]
    fn select_choice_records_the_option_and_clears_the_marker() {
        let mut app = QuizApp::from_quiz(capitals_quiz(), String::new());
        app.cards[0].unanswered = true;

        app.select_choice(0, 2);

        assert_eq!(app.cards[0].answer, AnswerInput::Choice(Some(2)));
        assert!(!app.cards[0].unanswered);
    }
}
