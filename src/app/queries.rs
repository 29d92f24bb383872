use super::{AnswerInput, QuestionCard};
use crate::model::{AnsweredQuestion, AnswerValue, Attempt, Question, QuestionFeedback, Quiz};

/// Índices de las preguntas sin responder: sin opción elegida, o texto en blanco.
pub fn unanswered_indices(cards: &[QuestionCard]) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter_map(|(idx, card)| match &card.answer {
            AnswerInput::Choice(None) => Some(idx),
            AnswerInput::Choice(Some(_)) => None,
            AnswerInput::Text(text) if text.trim().is_empty() => Some(idx),
            AnswerInput::Text(_) => None,
        })
        .collect()
}

/// Convierte el formulario relleno en el payload compacto para el servicio.
pub fn build_attempt(quiz: &Quiz, cards: &[QuestionCard]) -> Attempt {
    let questions = quiz
        .questions
        .iter()
        .zip(cards)
        .map(|(question, card)| AnsweredQuestion {
            id: question.id.clone(),
            text: question.text.clone(),
            options: question.answers.iter().map(|a| a.text.clone()).collect(),
            correct_answer: question.correct_answer,
            user_answer: match &card.answer {
                AnswerInput::Choice(selected) => selected.map(AnswerValue::Index),
                AnswerInput::Text(text) => Some(AnswerValue::Text(text.clone())),
            },
        })
        .collect();

    Attempt {
        title: quiz.title.clone(),
        questions,
    }
}

/// Resuelve a qué pregunta renderizada pertenece una entrada de feedback:
/// 1) coincidencia por id; 2) índice posicional como fallback.
pub fn matching_question_index(quiz: &Quiz, question_id: Option<&str>, fallback: usize) -> usize {
    if let Some(id) = question_id {
        if let Some(found) = quiz
            .questions
            .iter()
            .position(|q| q.id.as_deref() == Some(id))
        {
            return found;
        }
    }

    fallback
}

/// Texto de la respuesta correcta: del propio feedback, de las opciones del
/// quiz por índice, o una etiqueta genérica.
pub fn correct_answer_label(question: Option<&Question>, entry: &QuestionFeedback) -> String {
    if let Some(text) = entry
        .correct_answer_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    {
        return text.to_string();
    }

    if let (Some(question), Some(idx)) = (question, entry.correct_answer_index) {
        if let Some(answer) = question.answers.get(idx) {
            return answer.text.clone();
        }
    }

    match entry.correct_answer_index {
        Some(idx) => format!("option {idx}"),
        None => "option ?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::sample_quiz;

    fn cards_for(quiz: &Quiz) -> Vec<QuestionCard> {
        crate::app::QuizApp::from_quiz(quiz.clone(), String::new()).cards
    }

    #[test]
    fn unanswered_indices_lists_exactly_the_open_questions() {
        let quiz = sample_quiz();
        let mut cards = cards_for(&quiz);

        assert_eq!(unanswered_indices(&cards), vec![0, 1, 2, 3]);

        cards[0].answer = AnswerInput::Choice(Some(1));
        cards[3].answer = AnswerInput::Text("   ".into());
        assert_eq!(unanswered_indices(&cards), vec![1, 2, 3]);

        cards[1].answer = AnswerInput::Choice(Some(2));
        cards[2].answer = AnswerInput::Choice(Some(0));
        cards[3].answer = AnswerInput::Text("momentum stays constant".into());
        assert!(unanswered_indices(&cards).is_empty());
    }

    #[test]
    fn build_attempt_preserves_question_count_and_order() {
        let quiz = sample_quiz();
        let mut cards = cards_for(&quiz);
        cards[0].answer = AnswerInput::Choice(Some(1));
        cards[1].answer = AnswerInput::Choice(Some(2));
        cards[2].answer = AnswerInput::Choice(Some(2));
        cards[3].answer = AnswerInput::Text("it is conserved".into());

        let attempt = build_attempt(&quiz, &cards);

        assert_eq!(attempt.title, quiz.title);
        assert_eq!(attempt.questions.len(), quiz.questions.len());
        for (sent, original) in attempt.questions.iter().zip(&quiz.questions) {
            assert_eq!(sent.id, original.id);
            assert_eq!(sent.text, original.text);
            assert_eq!(sent.options.len(), original.answers.len());
            assert_eq!(sent.correct_answer, original.correct_answer);
        }
        assert_eq!(attempt.questions[0].user_answer, Some(AnswerValue::Index(1)));
        assert_eq!(
            attempt.questions[3].user_answer,
            Some(AnswerValue::Text("it is conserved".into()))
        );
    }

    #[test]
    fn matching_prefers_id_over_position() {
        let quiz = sample_quiz();

        assert_eq!(matching_question_index(&quiz, Some("3"), 0), 2);
        // id desconocido: se queda el índice posicional
        assert_eq!(matching_question_index(&quiz, Some("99"), 1), 1);
        assert_eq!(matching_question_index(&quiz, None, 2), 2);
    }

    #[test]
    fn correct_answer_label_prefers_text_then_option_lookup_then_generic() {
        let quiz = sample_quiz();
        let question = quiz.questions.first();

        let with_text = QuestionFeedback {
            correct_answer_text: Some("Momentum".into()),
            correct_answer_index: Some(0),
            ..Default::default()
        };
        assert_eq!(correct_answer_label(question, &with_text), "Momentum");

        let by_index = QuestionFeedback {
            correct_answer_index: Some(1),
            ..Default::default()
        };
        assert_eq!(correct_answer_label(question, &by_index), "Momentum");

        let out_of_range = QuestionFeedback {
            correct_answer_index: Some(7),
            ..Default::default()
        };
        assert_eq!(correct_answer_label(question, &out_of_range), "option 7");

        let unknown = QuestionFeedback::default();
        assert_eq!(correct_answer_label(question, &unknown), "option ?");
    }
}
