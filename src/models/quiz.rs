//! Mixed vocabulary and grammar quiz assembly.
//!
//! Half of the requested questions (rounded down) come from the vocabulary pool, in
//! pool order, so callers should pass words already sorted by due date. The rest
//! are drawn round-robin from up to three randomly chosen grammar topics. The
//! combined set is shuffled and never padded: a short pool gives a short quiz.

use super::{
    ExerciseContent, GrammarExercise, GrammarPool, QuestionKind, QuizQuestion,
    ReviewableVocabItem, SourceRef,
};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

pub const MAX_QUIZ_TOPICS: usize = 3;
pub const DISTRACTOR_COUNT: usize = 3;

/// Generic wrong answers for vocabulary questions.
pub const DISTRACTOR_POOL: &[&str] = &[
    "to eat", "to drink", "to sleep", "to walk", "to run", "hello", "goodbye", "please",
    "thank you", "yes", "no", "the house", "the car", "the book", "the dog", "the cat", "big",
    "small", "good", "bad", "happy", "sad",
];

/// Builds a multiple choice question asking for the translation of a word.
pub fn vocabulary_question<R: Rng + ?Sized>(
    reviewable: &ReviewableVocabItem,
    rng: &mut R,
) -> QuizQuestion {
    let correct = reviewable.item.translation.clone();
    let correct_lower = correct.to_lowercase();

    let candidates: Vec<&str> = DISTRACTOR_POOL
        .iter()
        .copied()
        .filter(|d| d.to_lowercase() != correct_lower)
        .collect();

    let mut options = vec![correct.clone()];
    options.extend(
        candidates
            .choose_multiple(rng, DISTRACTOR_COUNT)
            .map(|d| d.to_string()),
    );
    options.shuffle(rng);

    let correct_index = options.iter().position(|o| *o == correct);

    QuizQuestion {
        kind: QuestionKind::Vocabulary,
        text: format!("What does '{}' mean?", reviewable.item.word),
        options,
        correct_answer: correct,
        correct_index,
        source: SourceRef::Vocabulary {
            vocabulary_id: reviewable.item.id,
        },
    }
}

/// Converts a grammar exercise into a quiz question. Invalid exercises are logged
/// and skipped; kinds that cannot be asked in a quiz yield `None`.
pub fn grammar_question(exercise: &GrammarExercise) -> Option<QuizQuestion> {
    if let Err(e) = exercise.validate() {
        log::warn!("Skipping grammar exercise: {}", e);
        return None;
    }

    let source = SourceRef::Grammar {
        topic_id: exercise.topic_id,
        exercise_id: exercise.id,
    };

    match &exercise.content {
        ExerciseContent::MultipleChoice {
            question,
            options,
            correct_index,
        } => Some(QuizQuestion {
            kind: QuestionKind::GrammarMultipleChoice,
            text: question.clone(),
            options: options.clone(),
            correct_answer: options[*correct_index].clone(),
            correct_index: Some(*correct_index),
            source,
        }),
        ExerciseContent::FillBlank {
            sentence,
            correct_answer,
        } => Some(QuizQuestion {
            kind: QuestionKind::GrammarFillBlank,
            text: sentence.clone(),
            options: Vec::new(),
            correct_answer: correct_answer.clone(),
            correct_index: None,
            source,
        }),
        other => {
            log::debug!(
                "Exercise {} ({}) is not a quiz kind",
                exercise.id,
                other.kind()
            );
            None
        }
    }
}

/// Assembles a quiz of at most `count` questions.
pub fn compose_quiz<R: Rng + ?Sized>(
    vocab_pool: &[ReviewableVocabItem],
    grammar_pools: &[GrammarPool],
    count: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let vocab_count = count / 2;

    let mut questions: Vec<QuizQuestion> = vocab_pool
        .iter()
        .take(vocab_count)
        .map(|r| vocabulary_question(r, rng))
        .collect();

    let grammar_count = count - questions.len();

    // Topics with nothing askable are skipped before the random pick.
    let candidates: Vec<Vec<QuizQuestion>> = grammar_pools
        .iter()
        .map(|pool| pool.exercises.iter().filter_map(grammar_question).collect::<Vec<_>>())
        .filter(|qs| !qs.is_empty())
        .collect();

    let mut queues: Vec<VecDeque<QuizQuestion>> = candidates
        .choose_multiple(rng, MAX_QUIZ_TOPICS)
        .map(|qs| {
            let mut qs = qs.clone();
            qs.shuffle(rng);
            VecDeque::from(qs)
        })
        .collect();

    let mut drawn = 0;
    while drawn < grammar_count && queues.iter().any(|q| !q.is_empty()) {
        for queue in queues.iter_mut() {
            if drawn == grammar_count {
                break;
            }
            if let Some(q) = queue.pop_front() {
                questions.push(q);
                drawn += 1;
            }
        }
    }

    questions.shuffle(rng);
    questions.truncate(count);

    log::debug!(
        "Composed quiz: {} questions requested, {} assembled",
        count,
        questions.len()
    );
    questions
}
