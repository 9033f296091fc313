use serde::Serialize;

use crate::models::VocabularyItem;
use crate::stats::QuestionType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub vocabulary_id: i64,
    pub question: String,
    pub answer: String,
    pub question_type: QuestionType,
    pub kana_hint: String,
}

/// One question per direction for every item.
pub fn build_questions(items: &[VocabularyItem]) -> Vec<QuizQuestion> {
    items
        .iter()
        .flat_map(|item| {
            QuestionType::ALL.into_iter().map(move |qt| QuizQuestion {
                vocabulary_id: item.id,
                question: prompt_for(item, qt).to_string(),
                answer: expected_answer(item, qt).to_string(),
                question_type: qt,
                kana_hint: item.kana.clone(),
            })
        })
        .collect()
}

pub fn prompt_for(item: &VocabularyItem, question_type: QuestionType) -> &str {
    match question_type {
        QuestionType::JpToEn => &item.word,
        QuestionType::EnToJp => &item.english,
    }
}

pub fn expected_answer(item: &VocabularyItem, question_type: QuestionType) -> &str {
    match question_type {
        QuestionType::JpToEn => &item.english,
        QuestionType::EnToJp => &item.word,
    }
}

/// English answers match any of the comma-separated meanings, in full or as
/// a fragment. Japanese answers must be the word or its reading.
pub fn check_answer(item: &VocabularyItem, question_type: QuestionType, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return false;
    }

    match question_type {
        QuestionType::JpToEn => item
            .english
            .split(',')
            .map(|meaning| meaning.trim().to_lowercase())
            .any(|meaning| meaning.contains(&answer)),
        QuestionType::EnToJp => {
            answer == item.word.to_lowercase() || answer == item.kana.to_lowercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> VocabularyItem {
        VocabularyItem {
            id: 7,
            word: "足".to_string(),
            kana: "あし".to_string(),
            english: "foot, leg".to_string(),
            jlpt_level: "N5".to_string(),
            part_of_speech: "noun".to_string(),
            example: "足が痛いです。".to_string(),
            deck_id: None,
        }
    }

    #[test]
    fn test_two_questions_per_item() {
        let questions = build_questions(&[item()]);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "足");
        assert_eq!(questions[0].answer, "foot, leg");
        assert_eq!(questions[0].question_type, QuestionType::JpToEn);
        assert_eq!(questions[1].question, "foot, leg");
        assert_eq!(questions[1].answer, "足");
        assert!(questions.iter().all(|q| q.kana_hint == "あし" && q.vocabulary_id == 7));
    }

    #[test]
    fn test_english_answers() {
        let item = item();
        assert!(check_answer(&item, QuestionType::JpToEn, "Leg"));
        assert!(check_answer(&item, QuestionType::JpToEn, " foot "));
        assert!(check_answer(&item, QuestionType::JpToEn, "fo"));
        assert!(!check_answer(&item, QuestionType::JpToEn, "arm"));
        assert!(!check_answer(&item, QuestionType::JpToEn, "   "));
    }

    #[test]
    fn test_japanese_answers() {
        let item = item();
        assert!(check_answer(&item, QuestionType::EnToJp, "足"));
        assert!(check_answer(&item, QuestionType::EnToJp, "あし"));
        assert!(!check_answer(&item, QuestionType::EnToJp, "あ"));
        assert!(!check_answer(&item, QuestionType::EnToJp, ""));
    }
}
