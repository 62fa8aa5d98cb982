//! User-entered study configuration

use once_cell::sync::Lazy;
use regex::Regex;

use super::scoring::parse_int;

/// The word directly after the leading number, if any
static DURATION_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?\d+\s*([[:alpha:]]+)").expect("valid regex"));

/// Days per unit for a duration's unit word; unknown or missing units count as days
fn unit_days(duration: &str) -> u32 {
    let Some(unit) = DURATION_UNIT.captures(duration).map(|c| c[1].to_lowercase()) else {
        return 1;
    };
    match unit.as_str() {
        "w" | "wk" | "wks" | "week" | "weeks" => 7,
        "mo" | "mos" | "month" | "months" => 30,
        _ => 1,
    }
}

/// Which form field an edit applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigField {
    #[default]
    Topic,
    Duration,
    Lessons,
}

impl ConfigField {
    /// All fields in form order
    pub const ALL: [ConfigField; 3] = [Self::Topic, Self::Duration, Self::Lessons];

    /// Placeholder text shown in the empty input
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Topic => "What topic would you like to study?",
            Self::Duration => "How long do you have to study? (e.g., 2 weeks)",
            Self::Lessons => "Which lessons do you need to cover?",
        }
    }

    /// Short label for the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::Topic => "Topic",
            Self::Duration => "Duration",
            Self::Lessons => "Lessons",
        }
    }
}

/// Topic, duration and lesson list as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub topic: String,
    pub duration: String,
    /// Comma-separated, optional
    pub lessons: String,
}

impl SessionConfig {
    /// Read one field
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Topic => &self.topic,
            ConfigField::Duration => &self.duration,
            ConfigField::Lessons => &self.lessons,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::Topic => self.topic = value,
            ConfigField::Duration => self.duration = value,
            ConfigField::Lessons => self.lessons = value,
        }
    }

    /// Lessons split on commas, trimmed, empties dropped
    pub fn lessons_list(&self) -> Vec<&str> {
        self.lessons.split(',').map(str::trim).filter(|l| !l.is_empty()).collect()
    }

    /// Study length in days, from the leading number of `duration`
    ///
    /// Only the word right after the number is read as a unit: weeks count
    /// seven days, months thirty. Non-positive or missing numbers give `None`.
    pub fn duration_days(&self) -> Option<u32> {
        let amount = u32::try_from(parse_int(&self.duration)?).ok().filter(|n| *n > 0)?;
        Some(amount.saturating_mul(unit_days(&self.duration)))
    }
}
