//! Exercise content, one variant per exercise kind.
//!
//! Each variant carries exactly the fields its kind needs, selected by the
//! `exercise_type` discriminator in serialized form.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub left: String,
    pub right: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exercise_type", rename_all = "snake_case")]
pub enum ExerciseContent {
    VocabularyIntro {
        word: String,
        translation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pronunciation_ipa: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example_sentence: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example_translation: Option<String>,
    },
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_index: usize,
    },
    Translation {
        source_text: String,
        accepted_answers: Vec<String>,
    },
    FillBlank {
        sentence: String,
        correct_answer: String,
    },
    Listening {
        text: String,
    },
    Speaking {
        text: String,
    },
    Matching {
        pairs: Vec<MatchingPair>,
    },
    ConversationPrompt {
        context: String,
        ai_message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected_response_hint: Option<String>,
    },
}

impl ExerciseContent {
    pub fn kind(&self) -> &'static str {
        match self {
            ExerciseContent::VocabularyIntro { .. } => "vocabulary_intro",
            ExerciseContent::MultipleChoice { .. } => "multiple_choice",
            ExerciseContent::Translation { .. } => "translation",
            ExerciseContent::FillBlank { .. } => "fill_blank",
            ExerciseContent::Listening { .. } => "listening",
            ExerciseContent::Speaking { .. } => "speaking",
            ExerciseContent::Matching { .. } => "matching",
            ExerciseContent::ConversationPrompt { .. } => "conversation_prompt",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarTopic {
    pub id: i64,
    pub title: String,
    pub title_fr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarExercise {
    pub id: i64,
    pub topic_id: i64,
    /// 1 (easiest) to 10.
    pub difficulty: u8,
    pub content: ExerciseContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl GrammarExercise {
    /// Checks the exercise is internally consistent.
    pub fn validate(&self) -> Result<(), ContentError> {
        if let ExerciseContent::MultipleChoice {
            options,
            correct_index,
            ..
        } = &self.content
        {
            if options.is_empty() {
                return Err(ContentError::EmptyOptions {
                    exercise_id: self.id,
                });
            }
            if *correct_index >= options.len() {
                return Err(ContentError::InvalidCorrectIndex {
                    exercise_id: self.id,
                    index: *correct_index,
                    options: options.len(),
                });
            }
        }
        Ok(())
    }
}

/// A topic with the exercises available to draw quiz questions from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarPool {
    pub topic: GrammarTopic,
    pub exercises: Vec<GrammarExercise>,
}
