pub mod content_pack;
pub mod dates;
pub mod exercise;
pub mod grammar_drill;
pub mod learning_card;
pub mod learning_session;
pub mod mastery;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_session;
pub mod review_state;
pub mod sm2;
pub mod streak;
pub mod vocabulary;

pub use content_pack::ContentPack;
pub use exercise::{ExerciseContent, GrammarExercise, GrammarPool, GrammarTopic, MatchingPair};
pub use grammar_drill::{DrillItem, GrammarDrillSession};
pub use learning_card::LearningCard;
pub use learning_session::{LearningSession, record_activity};
pub use mastery::{GrammarProgress, difficulty_range_for_mastery, update_mastery};
pub use quiz::compose_quiz;
pub use quiz_question::{QuestionKind, QuizAnswer, QuizQuestion, SourceRef, check_translation};
pub use quiz_session::QuizSession;
pub use review_state::{ReviewState, VocabularyStatus};
pub use sm2::schedule_review;
pub use streak::{StreakState, update_streak};
pub use vocabulary::{ReviewableVocabItem, VocabularyItem, select_due};
