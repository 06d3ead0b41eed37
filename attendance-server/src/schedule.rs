//! 周例会日程 — recurring session occurrence resolution
//!
//! The group meets every Saturday morning (09:00 business time). The
//! occurrence shown to callers stays on *today* for the whole of a
//! Saturday until the late-afternoon cutoff, so same-day walk-in
//! registration works all day; past the cutoff the date rolls forward to
//! next week. All comparisons run in the business timezone, never the
//! caller's.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use shared::models::SessionInfo;

/// Sessions are pinned to Saturday.
const SESSION_WEEKDAY: Weekday = Weekday::Sat;

/// Recurring-session resolver. Pure: every method is a function of the
/// `now` it is handed, so tests inject fixed instants.
#[derive(Debug, Clone, Copy)]
pub struct SessionSchedule {
    /// Business timezone (e.g. Africa/Lagos)
    pub tz: Tz,
    /// Same-day sessions stay current until this local time; the session
    /// itself is posted at 09:00, the late cutoff keeps walk-in
    /// registration open after the event has started.
    pub cutoff: NaiveTime,
}

impl SessionSchedule {
    pub fn new(tz: Tz, cutoff: NaiveTime) -> Self {
        Self { tz, cutoff }
    }

    /// Resolve the current occurrence date.
    ///
    /// Next Saturday in the business timezone; if today is Saturday and
    /// local time is before the cutoff (strictly — 17:00:00 itself already
    /// rolls), today is the occurrence.
    pub fn current_occurrence(&self, now: DateTime<Utc>) -> NaiveDate {
        let local = now.with_timezone(&self.tz);
        let days_ahead = (SESSION_WEEKDAY.num_days_from_monday() + 7
            - local.weekday().num_days_from_monday())
            % 7;
        let mut date = local.date_naive() + Duration::days(i64::from(days_ahead));
        if days_ahead == 0 && local.time() >= self.cutoff {
            date += Duration::days(7);
        }
        date
    }

    /// The current occurrence and the `n - 1` before it, most recent
    /// first, exactly 7 days apart.
    pub fn past_occurrences(&self, now: DateTime<Utc>, n: usize) -> Vec<NaiveDate> {
        let head = self.current_occurrence(now);
        (0..n)
            .map(|i| head - Duration::days(7 * i as i64))
            .collect()
    }

    /// Current occurrence as the API-facing `SessionInfo` pair.
    pub fn session_info(&self, now: DateTime<Utc>) -> SessionInfo {
        let date = self.current_occurrence(now);
        SessionInfo {
            session_date_iso: date.format("%Y-%m-%d").to_string(),
            // en-GB long form: "Saturday, 7 June 2025"
            display_date: date.format("%A, %-d %B %Y").to_string(),
        }
    }
}
