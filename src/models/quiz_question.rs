//! Quiz questions and answer checking.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Vocabulary,
    GrammarMultipleChoice,
    GrammarFillBlank,
}

/// Where a question came from, so its answer can be fed back to the right record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceRef {
    Vocabulary { vocabulary_id: i64 },
    Grammar { topic_id: i64, exercise_id: i64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub kind: QuestionKind,
    pub text: String,
    /// Empty for fill-blank questions.
    pub options: Vec<String>,
    pub correct_answer: String,
    pub correct_index: Option<usize>,
    pub source: SourceRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizAnswer {
    Choice(usize),
    Text(String),
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Trimmed, case-insensitive match against any accepted answer.
pub fn check_translation(input: &str, accepted_answers: &[String]) -> bool {
    let input = normalize(input);
    accepted_answers.iter().any(|a| normalize(a) == input)
}

impl QuizQuestion {
    /// Grades an answer. A choice for a fill-blank question (or text for a
    /// choice question) is never correct.
    pub fn check(&self, answer: &QuizAnswer) -> bool {
        match (self.kind, answer) {
            (QuestionKind::GrammarFillBlank, QuizAnswer::Text(text)) => {
                normalize(text) == normalize(&self.correct_answer)
            }
            (
                QuestionKind::Vocabulary | QuestionKind::GrammarMultipleChoice,
                QuizAnswer::Choice(i),
            ) => self.correct_index == Some(*i),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question() -> QuizQuestion {
        QuizQuestion {
            kind: QuestionKind::Vocabulary,
            text: "What does 'chat' mean?".to_string(),
            options: vec!["the dog".into(), "the cat".into(), "big".into(), "no".into()],
            correct_answer: "the cat".to_string(),
            correct_index: Some(1),
            source: SourceRef::Vocabulary { vocabulary_id: 4 },
        }
    }

    fn fill_blank_question() -> QuizQuestion {
        QuizQuestion {
            kind: QuestionKind::GrammarFillBlank,
            text: "Nous ___ français.".to_string(),
            options: vec![],
            correct_answer: "parlons".to_string(),
            correct_index: None,
            source: SourceRef::Grammar {
                topic_id: 1,
                exercise_id: 2,
            },
        }
    }

    #[test]
    fn test_check_choice() {
        let q = choice_question();
        assert!(q.check(&QuizAnswer::Choice(1)));
        assert!(!q.check(&QuizAnswer::Choice(0)));
        assert!(!q.check(&QuizAnswer::Text("the cat".into())));
    }

    #[test]
    fn test_check_fill_blank_normalises() {
        let q = fill_blank_question();
        assert!(q.check(&QuizAnswer::Text("  Parlons ".into())));
        assert!(!q.check(&QuizAnswer::Text("parlez".into())));
        assert!(!q.check(&QuizAnswer::Choice(0)));
    }

    #[test]
    fn test_check_translation() {
        let accepted = vec!["I am hungry".to_string(), "I'm hungry".to_string()];
        assert!(check_translation("i'm HUNGRY\n", &accepted));
        assert!(!check_translation("I am thirsty", &accepted));
        assert!(!check_translation("anything", &[]));
    }
}
