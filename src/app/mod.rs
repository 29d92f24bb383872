use crate::data::{self, LoadError};
use crate::feedback::remote;
use crate::model::{AppState, Question, Quiz, SubmitPhase};

#[cfg(target_arch = "wasm32")]
use crate::feedback::remote::SubmitError;
#[cfg(target_arch = "wasm32")]
use crate::model::FeedbackResponse;
#[cfg(target_arch = "wasm32")]
use std::sync::mpsc::Receiver;

// Submódulos
pub mod actions;
pub mod queries;
pub mod resets;
pub mod view_models;

pub const FEEDBACK_PLACEHOLDER: &str = "(no feedback yet)";
pub const SUBMITTING_MESSAGE: &str = "Submitting…";
pub const AI_UNAVAILABLE_MESSAGE: &str = "Our AI isn't available at the moment";

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerInput {
    Choice(Option<usize>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionResult {
    Correct,
    Incorrect { correct_text: String },
}

/// Estado de interacción de una pregunta renderizada, en paralelo a `Quiz.questions`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCard {
    pub answer: AnswerInput,
    pub unanswered: bool,
    pub result: Option<QuestionResult>,
}

impl QuestionCard {
    fn for_question(question: &Question) -> Self {
        let answer = if question.answers.is_empty() {
            AnswerInput::Text(String::new())
        } else {
            AnswerInput::Choice(None)
        };

        Self {
            answer,
            unanswered: false,
            result: None,
        }
    }
}

pub struct QuizApp {
    pub state: AppState,
    pub quiz: Quiz,
    pub cards: Vec<QuestionCard>,
    pub phase: SubmitPhase,
    pub feedback_message: String,
    pub load_error: String,
    pub api_base: String,
    pub pending_scroll: Option<usize>,
    #[cfg(target_arch = "wasm32")]
    quiz_rx: Option<Receiver<Result<Quiz, LoadError>>>,
    #[cfg(target_arch = "wasm32")]
    feedback_rx: Option<Receiver<Result<FeedbackResponse, SubmitError>>>,
}

impl QuizApp {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        let api_base = remote::api_base_from_environment();
        let url = data::quiz_url_from_environment();

        match data::fetch_quiz(&url) {
            Ok(quiz) => Self::from_quiz(quiz, api_base),
            Err(err) => {
                log::error!("quiz load from {url} failed: {err}");
                Self::load_failed(err, api_base)
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let api_base = remote::api_base_from_environment();
        let url = data::quiz_request_path(&data::quiz_file_from_location());
        let (tx, rx) = std::sync::mpsc::channel();

        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(data::fetch_quiz(&url).await);
        });

        Self {
            state: AppState::Loading,
            quiz: Quiz::default(),
            cards: Vec::new(),
            phase: SubmitPhase::Idle,
            feedback_message: FEEDBACK_PLACEHOLDER.to_string(),
            load_error: String::new(),
            api_base,
            pending_scroll: None,
            quiz_rx: Some(rx),
            feedback_rx: None,
        }
    }

    /// Construye el widget a partir de un quiz ya cargado.
    pub fn from_quiz(quiz: Quiz, api_base: String) -> Self {
        let cards = quiz
            .questions
            .iter()
            .map(QuestionCard::for_question)
            .collect();

        log::info!(
            "quiz \"{}\" loaded with {} questions",
            quiz.title,
            quiz.questions.len()
        );

        Self {
            state: AppState::Quiz,
            quiz,
            cards,
            phase: SubmitPhase::Idle,
            feedback_message: FEEDBACK_PLACEHOLDER.to_string(),
            load_error: String::new(),
            api_base,
            pending_scroll: None,
            #[cfg(target_arch = "wasm32")]
            quiz_rx: None,
            #[cfg(target_arch = "wasm32")]
            feedback_rx: None,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_failed(err: LoadError, api_base: String) -> Self {
        Self {
            state: AppState::LoadFailed,
            quiz: Quiz::default(),
            cards: Vec::new(),
            phase: SubmitPhase::Idle,
            feedback_message: FEEDBACK_PLACEHOLDER.to_string(),
            load_error: err.to_string(),
            api_base,
            pending_scroll: None,
        }
    }

    /// Pares (pregunta, tarjeta) en orden de renderizado.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (&Question, &mut QuestionCard)> {
        self.quiz.questions.iter().zip(self.cards.iter_mut())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn poll_quiz_load(&mut self) {
        let maybe_result = self.quiz_rx.as_ref().and_then(|rx| rx.try_recv().ok());

        if let Some(result) = maybe_result {
            self.quiz_rx = None;

            match result {
                Ok(quiz) => {
                    self.cards = quiz
                        .questions
                        .iter()
                        .map(QuestionCard::for_question)
                        .collect();
                    log::info!(
                        "quiz \"{}\" loaded with {} questions",
                        quiz.title,
                        quiz.questions.len()
                    );
                    self.quiz = quiz;
                    self.state = AppState::Quiz;
                }
                Err(err) => {
                    log::error!("quiz load failed: {err}");
                    self.load_error = err.to_string();
                    self.state = AppState::LoadFailed;
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_quiz() -> Quiz {
    serde_json::from_str(include_str!("../data/collision_quiz.json")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_quiz_builds_one_card_per_question_in_order() {
        let app = QuizApp::from_quiz(sample_quiz(), "http://127.0.0.1:5000".into());

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.cards.len(), app.quiz.questions.len());
        assert_eq!(app.feedback_message, FEEDBACK_PLACEHOLDER);

        // Las tres primeras son de opciones, la última de texto libre
        for card in &app.cards[..3] {
            assert_eq!(card.answer, AnswerInput::Choice(None));
        }
        assert_eq!(app.cards[3].answer, AnswerInput::Text(String::new()));
        assert!(app.cards.iter().all(|c| !c.unanswered && c.result.is_none()));
    }
}
