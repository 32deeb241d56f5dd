//! JSON import/export for content packs.
//! Saves and loads vocabulary and grammar content to/from JSON files.

use crate::error::Result;
use crate::models::ContentPack;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Exports a content pack to a JSON file at the specified path.
pub fn export_json_to_path(pack: &ContentPack, path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(pack)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a content pack from a JSON file.
/// Fails if the file is missing, is not valid JSON, or contains a broken exercise.
pub fn import_json(path: impl AsRef<Path>) -> Result<ContentPack> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let pack: ContentPack = serde_json::from_str(&contents)?;
    pack.validate()?;

    log::info!(
        "Imported {} words and {} topics from '{}'",
        pack.vocabulary.len(),
        pack.topics.len(),
        path.display()
    );
    Ok(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContentError, StoreError};
    use crate::models::{
        ExerciseContent, GrammarExercise, GrammarPool, GrammarTopic, VocabularyItem,
    };
    use std::fs;

    fn create_test_pack() -> ContentPack {
        ContentPack {
            vocabulary: vec![
                VocabularyItem::new(1, "bonjour", "hello"),
                VocabularyItem::new(2, "merci", "thank you"),
            ],
            topics: vec![GrammarPool {
                topic: GrammarTopic {
                    id: 1,
                    title: "Être".to_string(),
                    title_fr: "Le verbe être".to_string(),
                    description: None,
                    explanation: None,
                    sort_order: 1,
                },
                exercises: vec![GrammarExercise {
                    id: 11,
                    topic_id: 1,
                    difficulty: 1,
                    content: ExerciseContent::MultipleChoice {
                        question: "Tu ___ fatigué.".to_string(),
                        options: vec!["es".to_string(), "est".to_string()],
                        correct_index: 0,
                    },
                    hint: None,
                }],
            }],
        }
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.json");
        let original = create_test_pack();

        export_json_to_path(&original, &path).unwrap();
        assert!(fs::metadata(&path).is_ok(), "File should exist");

        let imported = import_json(&path).unwrap();
        assert_eq!(imported, original);
    }

    #[test]
    fn test_import_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        let json_content = r#"{
  "vocabulary": [
    { "id": 5, "word": "le chat", "translation": "the cat", "category": "animals" }
  ],
  "topics": [
    {
      "topic": { "id": 2, "title": "Articles", "title_fr": "Les articles" },
      "exercises": [
        {
          "id": 20,
          "topic_id": 2,
          "difficulty": 2,
          "content": { "exercise_type": "fill_blank", "sentence": "___ maison", "correct_answer": "la" }
        }
      ]
    }
  ]
}"#;
        fs::write(&path, json_content).unwrap();

        let pack = import_json(&path).unwrap();
        assert_eq!(pack.vocabulary[0].category.as_deref(), Some("animals"));
        assert_eq!(pack.topics[0].topic.sort_order, 0);
        assert_eq!(pack.exercise_count(), 1);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_json(dir.path().join("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_import_rejects_broken_exercise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut pack = create_test_pack();
        pack.topics[0].exercises[0].content = ExerciseContent::MultipleChoice {
            question: "?".to_string(),
            options: vec!["es".to_string()],
            correct_index: 1,
        };
        export_json_to_path(&pack, &path).unwrap();

        assert!(matches!(
            import_json(&path),
            Err(StoreError::Content(ContentError::InvalidCorrectIndex { exercise_id: 11, .. }))
        ));
    }
}
