use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SrsError {
    #[error("unknown SRS stage '{0}'")]
    UnknownStage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Child,
    Student,
    Scholar,
    Enlightened,
    Burned,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Child,
        Stage::Student,
        Stage::Scholar,
        Stage::Enlightened,
        Stage::Burned,
    ];

    pub const LOWEST: Stage = Stage::Child;
    pub const TERMINAL: Stage = Stage::Burned;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Child => "Child",
            Stage::Student => "Student",
            Stage::Scholar => "Scholar",
            Stage::Enlightened => "Enlightened",
            Stage::Burned => "Burned",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }

    /// Lenient parse for stored data: an unrecognized label becomes the
    /// lowest stage. The caller opts into this; the scheduler itself never does.
    pub fn parse_or_lowest(label: &str) -> Stage {
        match label.parse() {
            Ok(stage) => stage,
            Err(e) => {
                log::warn!("{}; treating it as {}", e, Self::LOWEST);
                Self::LOWEST
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| SrsError::UnknownStage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    After(Duration),
    Terminal,
}

/// How long an item waits in each stage before it is due again.
#[derive(Debug, Clone)]
pub struct StageTable {
    intervals: [Interval; 5],
    terminal_horizon: Duration,
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            intervals: [
                Interval::After(Duration::hours(4)),
                Interval::After(Duration::hours(8)),
                Interval::After(Duration::days(1)),
                Interval::After(Duration::days(3)),
                Interval::Terminal,
            ],
            terminal_horizon: Duration::days(365 * 10),
        }
    }
}

impl StageTable {
    pub fn interval_for(&self, stage: Stage) -> Interval {
        self.intervals[stage.index()]
    }

    pub fn index_of(&self, stage: Stage) -> usize {
        stage.index()
    }

    /// Concrete delay for a stage. The terminal stage gets the far-future
    /// horizon so a next-review timestamp always exists.
    pub fn delay_for(&self, stage: Stage) -> Duration {
        match self.interval_for(stage) {
            Interval::After(d) => d,
            Interval::Terminal => self.terminal_horizon,
        }
    }

    pub fn describe(&self) -> Vec<StageInfo> {
        Stage::ALL
            .iter()
            .map(|&stage| {
                let (interval, summary) = match (self.interval_for(stage), stage) {
                    (Interval::Terminal, _) => ("Mastered".to_string(), "No more reviews needed"),
                    (Interval::After(d), Stage::Child) => (humanize(d), "Just learned"),
                    (Interval::After(d), Stage::Student) => (humanize(d), "Getting familiar"),
                    (Interval::After(d), Stage::Scholar) => (humanize(d), "Well understood"),
                    (Interval::After(d), _) => (humanize(d), "Nearly mastered"),
                };
                StageInfo {
                    stage,
                    interval,
                    summary: summary.to_string(),
                }
            })
            .collect()
    }
}

fn humanize(d: Duration) -> String {
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    if d.num_days() > 0 && d.num_hours() % 24 == 0 {
        plural(d.num_days(), "day")
    } else if d.num_hours() > 0 {
        plural(d.num_hours(), "hour")
    } else {
        plural(d.num_minutes(), "minute")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    pub stage: Stage,
    pub interval: String,
    pub summary: String,
}

/// Per-item learning state as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub correct_count: u32,
    pub last_review: Option<DateTime<Utc>>,
    pub next_review: DateTime<Utc>,
}

pub const DEFAULT_PROMOTE_THRESHOLD: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Stage transitions and review timing. Holds only immutable configuration,
/// so a single instance can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct SrsScheduler {
    table: StageTable,
    promote_threshold: NonZeroU32,
}

impl Default for SrsScheduler {
    fn default() -> Self {
        Self::new(StageTable::default(), DEFAULT_PROMOTE_THRESHOLD)
    }
}

impl SrsScheduler {
    pub fn new(table: StageTable, promote_threshold: NonZeroU32) -> Self {
        Self {
            table,
            promote_threshold,
        }
    }

    pub fn table(&self) -> &StageTable {
        &self.table
    }

    pub fn promote_threshold(&self) -> u32 {
        self.promote_threshold.get()
    }

    pub fn next_review_time(&self, stage: Stage, from: DateTime<Utc>) -> DateTime<Utc> {
        from + self.table.delay_for(stage)
    }

    pub fn advance(&self, stage: Stage) -> Stage {
        Stage::from_index(self.table.index_of(stage) + 1).unwrap_or(stage)
    }

    pub fn demote(&self, stage: Stage) -> Stage {
        match self.table.index_of(stage) {
            0 => stage,
            i => Stage::from_index(i - 1).unwrap_or(Stage::LOWEST),
        }
    }

    pub fn advance_label(&self, label: &str) -> Result<Stage, SrsError> {
        Ok(self.advance(label.parse()?))
    }

    pub fn demote_label(&self, label: &str) -> Result<Stage, SrsError> {
        Ok(self.demote(label.parse()?))
    }

    /// Fresh record for an item whose lesson was just completed.
    pub fn start(&self, now: DateTime<Utc>) -> ProgressSnapshot {
        ProgressSnapshot {
            stage: Stage::LOWEST,
            correct_count: 0,
            last_review: Some(now),
            next_review: self.next_review_time(Stage::LOWEST, now),
        }
    }

    /// Applies one answer to a record.
    ///
    /// A correct answer bumps the consecutive-correct counter and promotes the
    /// item once the counter reaches the threshold. A wrong answer demotes it
    /// one stage straight away. Either way the counter restarts after a stage
    /// change and the next review is scheduled from `now`.
    pub fn apply_review(
        &self,
        record: &ProgressSnapshot,
        correct: bool,
        now: DateTime<Utc>,
    ) -> ProgressSnapshot {
        let (stage, correct_count) = if correct {
            let count = record.correct_count.saturating_add(1);
            if count >= self.promote_threshold.get() {
                (self.advance(record.stage), 0)
            } else {
                (record.stage, count)
            }
        } else {
            (self.demote(record.stage), 0)
        };

        ProgressSnapshot {
            stage,
            correct_count,
            last_review: Some(now),
            next_review: self.next_review_time(stage, now),
        }
    }

    pub fn is_due(&self, record: &ProgressSnapshot, now: DateTime<Utc>) -> bool {
        !record.stage.is_terminal() && record.next_review <= now
    }
}

#[cfg(test)]
#[path = "srs_tests.rs"]
mod srs_tests;
