//! Chronological ordering of walk sessions into upcoming and past buckets

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::date::parse_date;
use crate::types::WalkSession;

/// Sessions split around a reference day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOrdering<'a> {
    /// Sessions on or after the reference day, soonest first
    pub upcoming: Vec<&'a WalkSession>,
    /// Sessions before the reference day, most recent first
    pub past: Vec<&'a WalkSession>,
    /// Sessions whose date could not be parsed, in input order
    pub rejected: Vec<&'a WalkSession>,
}

impl<'a> SessionOrdering<'a> {
    /// Upcoming sessions followed by past sessions
    pub fn ordered(&self) -> Vec<&'a WalkSession> {
        self.upcoming.iter().chain(self.past.iter()).copied().collect()
    }

    /// Number of sessions with a valid date
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_rejected(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Partition and sort sessions relative to `today`.
///
/// Sorting is stable, so sessions sharing a date keep their input order.
pub fn order_sessions<'a, I>(sessions: I, today: NaiveDate) -> SessionOrdering<'a>
where
    I: IntoIterator<Item = &'a WalkSession>,
{
    let mut upcoming: Vec<(NaiveDate, &'a WalkSession)> = Vec::new();
    let mut past: Vec<(NaiveDate, &'a WalkSession)> = Vec::new();
    let mut rejected = Vec::new();

    for session in sessions {
        match parse_date(&session.date) {
            Some(date) if date >= today => upcoming.push((date, session)),
            Some(date) => past.push((date, session)),
            None => {
                tracing::warn!(
                    session_id = %session.id,
                    date = %session.date,
                    "skipping session with unparseable date"
                );
                rejected.push(session);
            }
        }
    }

    upcoming.sort_by(|a, b| a.0.cmp(&b.0));
    past.sort_by(|a, b| b.0.cmp(&a.0));

    SessionOrdering {
        upcoming: upcoming.into_iter().map(|(_, s)| s).collect(),
        past: past.into_iter().map(|(_, s)| s).collect(),
        rejected,
    }
}
