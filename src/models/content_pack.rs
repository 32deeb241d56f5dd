//! A bundle of catalog content: words plus grammar topics with their exercises.
use super::{GrammarPool, VocabularyItem};
use crate::error::ContentError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub vocabulary: Vec<VocabularyItem>,
    #[serde(default)]
    pub topics: Vec<GrammarPool>,
}

impl ContentPack {
    /// Checks every exercise, stopping at the first broken one. An exercise must
    /// name the topic it is listed under.
    pub fn validate(&self) -> Result<(), ContentError> {
        for pool in &self.topics {
            for exercise in &pool.exercises {
                if exercise.topic_id != pool.topic.id {
                    return Err(ContentError::TopicMismatch {
                        exercise_id: exercise.id,
                        expected: pool.topic.id,
                        found: exercise.topic_id,
                    });
                }
                exercise.validate()?;
            }
        }
        Ok(())
    }

    pub fn exercise_count(&self) -> usize {
        self.topics.iter().map(|pool| pool.exercises.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseContent, GrammarExercise, GrammarTopic};

    fn pack_with_exercise_topic(topic_id: i64) -> ContentPack {
        ContentPack {
            vocabulary: vec![VocabularyItem::new(1, "chat", "cat")],
            topics: vec![GrammarPool {
                topic: GrammarTopic {
                    id: 10,
                    title: "Articles".to_string(),
                    title_fr: "Les articles".to_string(),
                    description: None,
                    explanation: None,
                    sort_order: 1,
                },
                exercises: vec![GrammarExercise {
                    id: 101,
                    topic_id,
                    difficulty: 1,
                    content: ExerciseContent::FillBlank {
                        sentence: "___ chat".to_string(),
                        correct_answer: "le".to_string(),
                    },
                    hint: None,
                }],
            }],
        }
    }

    #[test]
    fn test_valid_pack() {
        let pack = pack_with_exercise_topic(10);
        assert_eq!(pack.validate(), Ok(()));
        assert_eq!(pack.exercise_count(), 1);
    }

    #[test]
    fn test_exercise_listed_under_wrong_topic() {
        let pack = pack_with_exercise_topic(99);
        assert_eq!(
            pack.validate(),
            Err(ContentError::TopicMismatch {
                exercise_id: 101,
                expected: 10,
                found: 99,
            })
        );
    }
}
