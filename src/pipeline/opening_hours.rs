// Opening-hours state machine, evaluated against one frozen instant

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::models::PharmacySource;

/// Schedule sentinel for pharmacies that never close
pub const ROUND_THE_CLOCK: &str = "Круглосуточно";

/// Availability of one pharmacy at the evaluation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PharmacyStatus {
    /// Open with more than the closing-soon window remaining
    OpenStable,

    /// Open but closing within the configured window
    OpenClosingSoon,

    /// Not open at the evaluation instant, or schedule unparseable
    Closed,
}

impl PharmacyStatus {
    /// Open in either variant
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Classifies one pharmacy against a frozen `now`.
///
/// The caller captures `now` once per resolution so every pharmacy in
/// the same resolution is judged against the same instant. A schedule
/// that cannot be parsed yields `Closed`: an uncertain pharmacy is never
/// recommended as open.
pub fn evaluate_status(
    source: &PharmacySource,
    now: DateTime<Utc>,
    closing_soon_window: Duration,
) -> PharmacyStatus {
    if source.opening_hours == ROUND_THE_CLOCK {
        return PharmacyStatus::OpenStable;
    }

    let (opens_at, closes_at) = match parse_window(source) {
        Some(window) => window,
        None => {
            warn!(
                "pharmacy {:?}: unparseable opening window, treating as closed",
                source.code
            );
            return PharmacyStatus::Closed;
        }
    };

    if now < opens_at {
        // Not yet open today
        return PharmacyStatus::Closed;
    }
    if closes_at <= now {
        return PharmacyStatus::Closed;
    }
    if closes_at - now <= closing_soon_window {
        return PharmacyStatus::OpenClosingSoon;
    }

    PharmacyStatus::OpenStable
}

fn parse_window(source: &PharmacySource) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let opens_at = parse_instant(source.opens_at.as_deref()?)?;
    let closes_at = parse_instant(source.closes_at.as_deref()?)?;
    Some((opens_at, closes_at))
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}
