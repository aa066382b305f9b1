use chrono::{Datelike as _, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::foundation::{
    core::{GRID_DAYS, GRID_WEEKS, IntensityGrid},
    error::{ArtError, ArtResult},
};

const FIRST_HOUR: u32 = 9;
const HOUR_STEP: u32 = 3;
const HOUR_SPAN: u32 = 14;
const MINUTE_STEP: u32 = 17;

/// One timestamped write event for cell `(day, week)`, the `index`-th of that day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct ScheduledEvent {
    pub week: usize,
    pub day: usize,
    pub index: u8,
    pub at: NaiveDateTime,
}

/// Ordered events for a whole grid.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Schedule {
    /// Calendar date of cell (row 0, column 0).
    pub anchor: NaiveDate,
    pub events: Vec<ScheduledEvent>,
    /// Cells with intensity > 0.
    pub active_days: usize,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.events.iter().map(|e| e.at)
    }

    /// Turn an empty schedule into [`ArtError::EmptyResult`] for callers that must abort.
    pub fn ensure_non_empty(self) -> ArtResult<Self> {
        if self.is_empty() {
            return Err(ArtError::empty_result(
                "no events to create (input is empty or too light); try a darker image, bolder text, \
                 or a different template",
            ));
        }
        Ok(self)
    }
}

/// Date of cell (row 0, column 0): `now - (52 + week_offset)` weeks, walked back to Sunday.
///
/// The 52-week span is a fixed 364 days and the week is assumed to start on Sunday; neither tracks
/// the viewer's own alignment rules exactly. Offsets that leave the representable calendar are a
/// validation error.
pub fn epoch_anchor(now: NaiveDateTime, week_offset: i64) -> ArtResult<NaiveDate> {
    let start = (GRID_WEEKS as i64)
        .checked_add(week_offset)
        .and_then(TimeDelta::try_weeks)
        .and_then(|back| now.date().checked_sub_signed(back))
        .ok_or_else(out_of_range)?;
    let since_sunday = TimeDelta::days(i64::from(start.weekday().num_days_from_sunday()));
    start.checked_sub_signed(since_sunday).ok_or_else(out_of_range)
}

fn out_of_range() -> ArtError {
    ArtError::validation("week offset out of calendar range")
}

/// Time of day for the `k`-th event of a day: `9 + (3k mod 14)` hours, `17k mod 60` minutes.
///
/// The hour never exceeds 22, so every `k` maps to a valid time.
pub fn event_time(k: u8) -> NaiveTime {
    let k = u32::from(k);
    let hour = FIRST_HOUR + (HOUR_STEP * k) % HOUR_SPAN;
    let minute = (MINUTE_STEP * k) % 60;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Walk the grid week by week, day by day, and emit `intensity` events per cell.
///
/// Output is chronologically sorted by construction. An all-zero grid yields an empty schedule.
#[tracing::instrument(skip(grid))]
pub fn schedule(grid: &IntensityGrid, week_offset: i64, now: NaiveDateTime) -> ArtResult<Schedule> {
    let anchor = epoch_anchor(now, week_offset)?;
    let mut events = Vec::with_capacity(grid.total_intensity() as usize);
    let mut active_days = 0usize;

    for week in 0..GRID_WEEKS {
        for day in 0..GRID_DAYS {
            let intensity = grid.get(day, week);
            if intensity == 0 {
                continue;
            }
            active_days += 1;

            let offset = TimeDelta::weeks(week as i64) + TimeDelta::days(day as i64);
            let date = anchor.checked_add_signed(offset).ok_or_else(out_of_range)?;
            events.extend((0..intensity).map(|index| ScheduledEvent {
                week,
                day,
                index,
                at: date.and_time(event_time(index)),
            }));
        }
    }

    tracing::debug!(%anchor, events = events.len(), active_days, "generated schedule");
    Ok(Schedule {
        anchor,
        events,
        active_days,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/generator.rs"]
mod tests;
