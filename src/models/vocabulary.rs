//! Vocabulary catalog entries and their pairing with learner review state.
use super::ReviewState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: i64,
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl VocabularyItem {
    pub fn new(id: i64, word: &str, translation: &str) -> Self {
        Self {
            id,
            word: word.to_string(),
            translation: translation.to_string(),
            pronunciation_ipa: None,
            gender: None,
            part_of_speech: None,
            category: None,
            example_sentence: None,
            example_translation: None,
        }
    }
}

/// A word together with the learner's current review state for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewableVocabItem {
    pub item: VocabularyItem,
    pub state: ReviewState,
}

/// Items due on `today`, most overdue first, at most `limit` of them.
pub fn select_due(
    items: &[ReviewableVocabItem],
    today: NaiveDate,
    limit: usize,
) -> Vec<ReviewableVocabItem> {
    let mut due: Vec<_> = items
        .iter()
        .filter(|r| r.state.is_due(today))
        .cloned()
        .collect();
    due.sort_by_key(|r| (r.state.next_review_date, r.item.id));
    due.truncate(limit);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn reviewable(id: i64, due_on: NaiveDate) -> ReviewableVocabItem {
        let mut state = ReviewState::new(id, day(1));
        state.next_review_date = due_on;
        ReviewableVocabItem {
            item: VocabularyItem::new(id, &format!("mot{}", id), &format!("word{}", id)),
            state,
        }
    }

    #[test]
    fn test_select_due_orders_and_limits() {
        let items = vec![
            reviewable(1, day(9)),
            reviewable(2, day(3)),
            reviewable(3, day(20)),
            reviewable(4, day(5)),
            reviewable(5, day(3)),
        ];

        let due = select_due(&items, day(10), 3);
        let ids: Vec<i64> = due.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![2, 5, 4]);
    }

    #[test]
    fn test_select_due_excludes_future() {
        let items = vec![reviewable(1, day(1).checked_add_days(Days::new(1)).unwrap())];
        assert!(select_due(&items, day(1), 10).is_empty());
        assert_eq!(select_due(&items, day(2), 10).len(), 1);
    }

    #[test]
    fn test_optional_fields_deserialize_when_absent() {
        let item: VocabularyItem =
            serde_json::from_str(r#"{"id": 1, "word": "bonjour", "translation": "hello"}"#)
                .unwrap();
        assert_eq!(item, VocabularyItem::new(1, "bonjour", "hello"));
    }
}
