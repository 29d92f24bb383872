use serde::{Deserialize, Deserializer, Serialize};

/// Quiz document as served from `/static/quiz-data/`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Quiz {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Question {
    #[serde(default, deserialize_with = "id_from_number_or_string")]
    pub id: Option<String>,
    pub text: String,
    // Sin opciones => pregunta de texto libre
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, deserialize_with = "index_if_integer")]
    pub correct_answer: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Answer {
    pub text: String,
}

/// Compact payload sent to the feedback service at submit time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attempt {
    pub title: String,
    pub questions: Vec<AnsweredQuestion>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnsweredQuestion {
    pub id: Option<String>,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: Option<usize>,
    pub user_answer: Option<AnswerValue>,
}

/// Selected option index for choice questions, raw text for free-text ones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(usize),
    Text(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FeedbackResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_feedback: Option<Vec<QuestionFeedback>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuestionFeedback {
    #[serde(default, deserialize_with = "id_from_number_or_string")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default, deserialize_with = "index_if_integer")]
    pub correct_answer_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_text: Option<String>,
}

/// Ids llegan como número o como string según la fuente; se comparan como string.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    }))
}

// El servicio de feedback emite "Unknown" cuando no conoce el índice.
fn index_if_integer<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()).map(|n| n as usize))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Loading,
    Quiz,
    LoadFailed,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Loading
    }
}

/// Submit flow: Idle -> Submitting -> ShowingResults | ShowingError -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    ShowingResults,
    ShowingError,
}

impl Default for SubmitPhase {
    fn default() -> Self {
        SubmitPhase::Idle
    }
}
