use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum note length, counted in characters rather than bytes.
pub const MAX_CONTENT_CHARS: usize = 500;

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

pub type NoteId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeUnit {
    /// Fixed millisecond length of one unit. Months are 30 days and years are
    /// 365 days; neither is calendar-aware.
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Seconds => SECOND_MS,
            TimeUnit::Minutes => MINUTE_MS,
            TimeUnit::Hours => HOUR_MS,
            TimeUnit::Days => DAY_MS,
            TimeUnit::Months => 30 * DAY_MS,
            TimeUnit::Years => 365 * DAY_MS,
        }
    }
}

/// How long a note lives: `duration` whole units of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub duration: u64,
    pub unit: TimeUnit,
}

impl Lifetime {
    pub fn new(duration: u64, unit: TimeUnit) -> Self {
        Self { duration, unit }
    }

    /// Total lifetime as a chrono duration. Rejects zero and values that do
    /// not fit in a millisecond offset.
    pub fn to_duration(self) -> Result<Duration, ValidationError> {
        if self.duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        let duration = i64::try_from(self.duration).map_err(|_| ValidationError::LifetimeOverflow)?;
        let millis = duration
            .checked_mul(self.unit.millis())
            .ok_or(ValidationError::LifetimeOverflow)?;
        Duration::try_milliseconds(millis).ok_or(ValidationError::LifetimeOverflow)
    }

    /// `now + lifetime`, failing instead of saturating on overflow.
    pub fn expiry_from(self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
        now.checked_add_signed(self.to_duration()?)
            .ok_or(ValidationError::LifetimeOverflow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Work,
    Shopping,
    Ideas,
    Tasks,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Shopping => "Shopping",
            Category::Ideas => "Ideas",
            Category::Tasks => "Tasks",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight: low=0, medium=1, high=2.
    pub fn weight(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFormat {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

/// Caller-supplied fields for creating or rewriting a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub content: String,
    pub lifetime: Lifetime,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub format: Option<NoteFormat>,
}

impl NoteInput {
    pub fn new(content: impl Into<String>, lifetime: Lifetime) -> Self {
        Self {
            content: content.into(),
            lifetime,
            category: None,
            color: None,
            priority: None,
            format: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_format(mut self, format: NoteFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Checks content length and lifetime, returning the expiry relative to `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
        let len = self.content.chars().count();
        if len > MAX_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong {
                len,
                max: MAX_CONTENT_CHARS,
            });
        }
        self.lifetime.expiry_from(now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub saved: bool,
    pub category: Option<Category>,
    pub color: Option<Color>,
    pub priority: Option<Priority>,
    pub format: Option<NoteFormat>,
}

impl Note {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.saved && self.expires_at > now
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.saved && self.expires_at <= now
    }

    pub fn effective_color(&self) -> Color {
        self.color.unwrap_or_default()
    }

    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_unit_table() {
        assert_eq!(TimeUnit::Seconds.millis(), 1_000);
        assert_eq!(TimeUnit::Minutes.millis(), 60_000);
        assert_eq!(TimeUnit::Hours.millis(), 3_600_000);
        assert_eq!(TimeUnit::Days.millis(), 86_400_000);
        assert_eq!(TimeUnit::Months.millis(), 30 * 86_400_000);
        assert_eq!(TimeUnit::Years.millis(), 365 * 86_400_000);
    }

    #[test]
    fn test_expiry_is_exact() {
        let expiry = Lifetime::new(3, TimeUnit::Months).expiry_from(t0()).unwrap();
        assert_eq!((expiry - t0()).num_milliseconds(), 3 * 30 * 86_400_000);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Lifetime::new(0, TimeUnit::Hours).to_duration().unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveDuration);
    }

    #[test]
    fn test_huge_duration_overflows() {
        let err = Lifetime::new(u64::MAX, TimeUnit::Years)
            .expiry_from(t0())
            .unwrap_err();
        assert_eq!(err, ValidationError::LifetimeOverflow);
    }

    #[test]
    fn test_content_limit_counts_chars() {
        let lifetime = Lifetime::new(1, TimeUnit::Minutes);
        // 500 multibyte chars are well over 500 bytes but still allowed
        let ok = NoteInput::new("é".repeat(MAX_CONTENT_CHARS), lifetime);
        assert!(ok.validate(t0()).is_ok());

        let too_long = NoteInput::new("a".repeat(MAX_CONTENT_CHARS + 1), lifetime);
        assert_eq!(
            too_long.validate(t0()).unwrap_err(),
            ValidationError::ContentTooLong { len: 501, max: 500 }
        );
    }

    #[test]
    fn test_defaults_for_display() {
        let note = Note {
            id: Uuid::new_v4(),
            content: "x".into(),
            created_at: t0(),
            expires_at: t0(),
            saved: false,
            category: None,
            color: None,
            priority: None,
            format: None,
        };
        assert_eq!(note.effective_color(), Color::Default);
        assert_eq!(note.effective_priority(), Priority::Medium);
        // expires_at == now counts as expired
        assert!(note.is_expired(t0()));
        assert!(!note.is_active(t0()));
    }

    #[test]
    fn test_input_deserializes_with_optional_fields_missing() {
        let input: NoteInput = serde_json::from_value(serde_json::json!({
            "content": "buy milk",
            "lifetime": { "duration": 2, "unit": "hours" },
            "category": "Shopping"
        }))
        .unwrap();
        assert_eq!(input.category, Some(Category::Shopping));
        assert_eq!(input.priority, None);
        assert_eq!(input.lifetime.unit, TimeUnit::Hours);
    }
}
