use thiserror::Error;

use crate::models::NewVocabulary;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("the CSV file has no usable rows")]
    Empty,
}

/// Parses a deck CSV. Prefers `word`/`meaning` headers and falls back to the
/// first two columns when they are missing.
pub fn parse_deck_csv(content: &str) -> Result<Vec<NewVocabulary>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect();

    let (word_col, meaning_col) = match (
        headers.iter().position(|h| h == "word"),
        headers.iter().position(|h| h == "meaning"),
    ) {
        (Some(w), Some(m)) => (w, m),
        _ => (0, 1),
    };

    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        let (Some(word), Some(meaning)) = (record.get(word_col), record.get(meaning_col)) else {
            continue;
        };
        if word.is_empty() {
            continue;
        }
        items.push(NewVocabulary {
            word: word.to_string(),
            kana: word.to_string(),
            english: meaning.to_string(),
            jlpt_level: "Custom".to_string(),
            part_of_speech: "unknown".to_string(),
            example: String::new(),
        });
    }

    if items.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_columns() {
        let csv = "meaning,notes,word\ncat,animal,猫\n dog , ,犬\n";
        let items = parse_deck_csv(csv).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].word, "猫");
        assert_eq!(items[0].english, "cat");
        assert_eq!(items[1].english, "dog");
        assert_eq!(items[1].kana, "犬");
        assert_eq!(items[1].jlpt_level, "Custom");
        assert_eq!(items[1].part_of_speech, "unknown");
    }

    #[test]
    fn test_positional_fallback() {
        let csv = "japanese,english\n水,water\n,skipped\n本\n山,mountain\n";
        let items = parse_deck_csv(csv).unwrap();
        let words: Vec<_> = items.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, ["水", "山"]);
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_deck_csv("word,meaning\n"), Err(ImportError::Empty)));
    }
}
