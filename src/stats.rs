use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::level::LevelPolicy;

/// Identity that owns a set of aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LearnerId(String);

impl LearnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    JpToEn,
    EnToJp,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::JpToEn, QuestionType::EnToJp];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: u32,
    pub correct: u32,
}

impl Tally {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percentage of correct answers, 0 before the first answer.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// Running counters for one learner, updated one event at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub level: u32,
    pub words_learned: u32,
    pub lessons_completed: u32,
    pub daily_streak: u32,
    pub jp_to_en: Tally,
    pub en_to_jp: Tally,
    pub last_activity: Option<DateTime<Utc>>,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            level: 1,
            words_learned: 0,
            lessons_completed: 0,
            daily_streak: 0,
            jp_to_en: Tally::default(),
            en_to_jp: Tally::default(),
            last_activity: None,
        }
    }
}

impl AggregateStats {
    pub fn tally(&self, direction: QuestionType) -> &Tally {
        match direction {
            QuestionType::JpToEn => &self.jp_to_en,
            QuestionType::EnToJp => &self.en_to_jp,
        }
    }

    /// Streak counts consecutive UTC days with activity.
    pub fn record_activity(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        self.daily_streak = match self.last_activity.map(|t| t.date_naive()) {
            None => 1,
            Some(last) if last == today => self.daily_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.daily_streak + 1,
            Some(last) if last > today => self.daily_streak.max(1),
            Some(_) => 1,
        };
        self.last_activity = Some(now);
    }

    pub fn record_lessons(&mut self, count: u32, now: DateTime<Utc>) {
        self.lessons_completed += count;
        self.record_activity(now);
    }

    /// `newly_learned` is set when the reviewed item left the lowest stage for
    /// the first time.
    pub fn record_review(
        &mut self,
        direction: QuestionType,
        correct: bool,
        newly_learned: bool,
        now: DateTime<Utc>,
        policy: &LevelPolicy,
    ) {
        match direction {
            QuestionType::JpToEn => self.jp_to_en.record(correct),
            QuestionType::EnToJp => self.en_to_jp.record(correct),
        }
        if newly_learned {
            self.words_learned += 1;
        }
        self.level = policy.level_for(self.words_learned);
        self.record_activity(now);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_accuracy_per_direction() {
        let policy = LevelPolicy::default();
        let mut stats = AggregateStats::default();
        assert_eq!(stats.tally(QuestionType::JpToEn).accuracy(), 0.0);

        stats.record_review(QuestionType::JpToEn, true, false, day(1), &policy);
        stats.record_review(QuestionType::JpToEn, false, false, day(1), &policy);
        stats.record_review(QuestionType::EnToJp, true, false, day(1), &policy);

        assert_eq!(stats.jp_to_en, Tally { total: 2, correct: 1 });
        assert_eq!(stats.jp_to_en.accuracy(), 50.0);
        assert_eq!(stats.en_to_jp.accuracy(), 100.0);
    }

    #[test]
    fn test_words_learned_drives_level() {
        let policy = LevelPolicy::default();
        let mut stats = AggregateStats::default();
        for _ in 0..29 {
            stats.record_review(QuestionType::JpToEn, true, true, day(1), &policy);
        }
        assert_eq!(stats.level, 1);
        stats.record_review(QuestionType::EnToJp, true, false, day(1), &policy);
        assert_eq!(stats.level, 1);
        stats.record_review(QuestionType::EnToJp, true, true, day(1), &policy);
        assert_eq!(stats.words_learned, 30);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn test_streak_rules() {
        let mut stats = AggregateStats::default();
        stats.record_activity(day(1));
        assert_eq!(stats.daily_streak, 1);
        stats.record_activity(day(1) + Duration::hours(2));
        assert_eq!(stats.daily_streak, 1);
        stats.record_activity(day(2));
        stats.record_activity(day(3));
        assert_eq!(stats.daily_streak, 3);
        stats.record_activity(day(6));
        assert_eq!(stats.daily_streak, 1);
    }

    #[test]
    fn test_lessons_and_reset() {
        let mut stats = AggregateStats::default();
        stats.record_lessons(5, day(4));
        assert_eq!(stats.lessons_completed, 5);
        assert_eq!(stats.words_learned, 0);
        assert_eq!(stats.daily_streak, 1);

        stats.reset();
        assert_eq!(stats, AggregateStats::default());
        assert_eq!(stats.level, 1);
    }

    #[test]
    fn test_question_type_labels() {
        assert_eq!(serde_json::to_string(&QuestionType::JpToEn).unwrap(), "\"jp_to_en\"");
        let parsed: QuestionType = serde_json::from_str("\"en_to_jp\"").unwrap();
        assert_eq!(parsed, QuestionType::EnToJp);
        assert!(serde_json::from_str::<QuestionType>("\"jp-to-en\"").is_err());
    }
}
