use serde::Serialize;

/// Closed set of tally kinds.
///
/// `Total` counts anybody entering the store, `Operational` counts the
/// repair-related visits (drop-off, pick-up, pop-in). They are recorded
/// independently: an operational visit is usually logged as a walk-in too.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Total,
    Operational,
}

impl EventKind {
    /// Parse user input. Accepts the DB names plus the short aliases used by
    /// the interactive session.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "total" | "t" | "walkin" | "walk-in" | "w" => Some(Self::Total),
            "operational" | "op" | "o" => Some(Self::Operational),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Total => "total",
            EventKind::Operational => "operational",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "total" => Some(EventKind::Total),
            "operational" => Some(EventKind::Operational),
            _ => None,
        }
    }

    /// Human label used in feedback messages.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Total => "Walk-in",
            EventKind::Operational => "Operational visit",
        }
    }
}
