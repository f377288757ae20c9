//! Slot calendar: derives candidate booking start times.
//!
//! The calendar is a pure function of a day's opening hours and a menu
//! duration. It never consults existing reservations or the clock; the
//! booking service subtracts the occupied set and applies the past-date
//! guard on top of this sequence.

use crate::slot::{DayHours, SlotTime, SLOT_MINUTES};

/// Yields the candidate start times for one day.
///
/// Candidates sit on the [`SLOT_MINUTES`] grid, begin at the first aligned
/// instant at or after opening, and satisfy
/// `start + duration <= closing time`. A closed day (`hours` is `None`) or
/// a duration longer than the open interval yields nothing.
///
/// # Examples
///
/// ```
/// use yoyaku::DayHours;
/// use yoyaku::calendar::candidate_starts;
///
/// let hours = DayHours::parse("09:00", "18:00").unwrap();
/// let slots: Vec<String> = candidate_starts(Some(hours), 30)
///     .map(|slot| slot.to_string())
///     .collect();
///
/// assert_eq!(slots.len(), 18);
/// assert_eq!(slots.first().map(String::as_str), Some("09:00"));
/// assert_eq!(slots.last().map(String::as_str), Some("17:30"));
///
/// // Closed day
/// assert_eq!(candidate_starts(None, 30).count(), 0);
/// ```
pub fn candidate_starts(
    hours: Option<DayHours>,
    duration_minutes: u32,
) -> impl Iterator<Item = SlotTime> {
    let (first, end) = match hours {
        Some(hours) => {
            let start = hours.start_minutes();
            // First grid-aligned instant at or after opening.
            let first = start.div_ceil(SLOT_MINUTES) * SLOT_MINUTES;
            (first, hours.end_minutes())
        }
        // Empty interval: the take_while below yields nothing.
        None => (0, 0),
    };

    (0u32..)
        .map(move |step| first + step * SLOT_MINUTES)
        .take_while(move |slot| slot + duration_minutes <= end)
        .map(SlotTime::from_minutes)
}
