use ratatui::style::Color;
use sea_query::Iden;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::icons;

pub const CACHE_VERSION: i32 = 2;

// Database table identifiers
#[derive(Iden)]
pub enum CacheMeta {
    Table,
    Key,
    Value,
}

#[derive(Iden)]
pub enum RecentProjectsTable {
    Table,
    ProjectId,
    FullName,
    ViewedAt,
}

#[derive(Iden)]
pub enum IssueTabPrefsTable {
    Table,
    ProjectId,
    TabId,
}

// Muted foreground shared by neutral states
pub const MUTED: Color = Color::DarkGray;

// Issue tabs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueTabId {
    All,
    Label(String),
}

impl IssueTabId {
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            IssueTabId::All => Self::ALL,
            IssueTabId::Label(name) => name,
        }
    }

    /// Parse a stored tab id. `"all"` always means the synthetic tab.
    pub fn parse(s: &str) -> Self {
        if s == Self::ALL {
            IssueTabId::All
        } else {
            IssueTabId::Label(s.to_string())
        }
    }
}

impl fmt::Display for IssueTabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTab {
    pub id: IssueTabId,
    pub label: String,
    pub count: usize,
}

impl IssueTab {
    pub const ALL_LABEL: &'static str = "All issues";

    pub fn all(count: usize) -> Self {
        Self {
            id: IssueTabId::All,
            label: Self::ALL_LABEL.to_string(),
            count,
        }
    }
}

// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Issues,
    PullRequests,
}

// PR status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStatus {
    Open,
    Draft,
    Merged,
    Unknown,
}

impl PrStatus {
    pub fn color(self) -> Color {
        match self {
            PrStatus::Open => Color::Green,
            PrStatus::Merged => Color::Magenta,
            PrStatus::Draft | PrStatus::Unknown => MUTED,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            PrStatus::Open => "open",
            PrStatus::Draft => "draft",
            PrStatus::Merged => "merged",
            PrStatus::Unknown => "unknown",
        }
    }
}

impl FromStr for PrStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "open" => PrStatus::Open,
            "draft" => PrStatus::Draft,
            "merged" => PrStatus::Merged,
            _ => PrStatus::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for PrStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(PrStatus::Unknown))
    }
}

// PR row indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Check,
    X,
    Trophy,
    Eye,
    Code,
    Other,
}

impl Indicator {
    pub fn display(self) -> (&'static str, Color) {
        match self {
            Indicator::Check => (icons::INDICATOR_CHECK, Color::Green),
            Indicator::X => (icons::INDICATOR_X, Color::Red),
            Indicator::Trophy => (icons::INDICATOR_TROPHY, MUTED),
            Indicator::Eye => (icons::INDICATOR_EYE, MUTED),
            Indicator::Code | Indicator::Other => (icons::INDICATOR_CODE, MUTED),
        }
    }
}

impl FromStr for Indicator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "check" => Indicator::Check,
            "x" => Indicator::X,
            "trophy" => Indicator::Trophy,
            "eye" => Indicator::Eye,
            "code" => Indicator::Code,
            _ => Indicator::Other,
        })
    }
}

impl<'de> Deserialize<'de> for Indicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(Indicator::Other))
    }
}

/// How an author badge is coloured, decided by keywords in its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Positive,
    Moderate,
    Negative,
    Neutral,
}

impl BadgeTone {
    pub fn classify(badge: &str) -> Self {
        if badge.contains("Excellent") || badge.contains("High") {
            BadgeTone::Positive
        } else if badge.contains("Moderate") {
            BadgeTone::Moderate
        } else if badge.contains("Low") || badge.contains("No") {
            BadgeTone::Negative
        } else {
            BadgeTone::Neutral
        }
    }

    pub fn color(self) -> Color {
        match self {
            BadgeTone::Positive => Color::Green,
            BadgeTone::Moderate => Color::Yellow,
            BadgeTone::Negative => Color::Red,
            BadgeTone::Neutral => MUTED,
        }
    }
}
