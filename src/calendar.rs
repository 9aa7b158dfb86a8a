//! Calendar pieces for the clinic desk.
//!
//! [`DateWindow`] is the rolling week offered for booking and
//! [`ScheduleGrid`] is one doctor's availability across that week.

use crate::models::{SlotState, SLOTS_PER_DAY, TIME_SLOTS, WINDOW_DAYS};
use chrono::{Duration, Local, NaiveDate};
use std::fmt;
use tracing::debug;

/// Display format for window dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Seven consecutive calendar days, starting with "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    days: [NaiveDate; WINDOW_DAYS],
}

impl DateWindow {
    /// Build the window starting at `first`, rolling over month and year
    /// boundaries through chrono's calendar arithmetic.
    pub fn starting(first: NaiveDate) -> Self {
        let mut days = [first; WINDOW_DAYS];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = first + Duration::days(offset as i64);
        }
        debug!(start = %first, "computed date window");
        DateWindow { days }
    }

    /// Build the window from the local wall clock.
    pub fn today() -> Self {
        Self::starting(Local::now().date_naive())
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Formatted date for a zero-based day index.
    pub fn label(&self, day: usize) -> Option<String> {
        self.days
            .get(day)
            .map(|date| date.format(DATE_FORMAT).to_string())
    }

    /// All formatted dates, in window order.
    pub fn labels(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.days[0].format(DATE_FORMAT),
            self.days[WINDOW_DAYS - 1].format(DATE_FORMAT)
        )
    }
}

/// A doctor's availability: one row per window day, one cell per time slot.
///
/// The dimensions are fixed; cells are only ever booked, never released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    cells: [[SlotState; SLOTS_PER_DAY]; WINDOW_DAYS],
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleGrid {
    /// A grid with every cell available.
    pub fn new() -> Self {
        ScheduleGrid {
            cells: [[SlotState::Available; SLOTS_PER_DAY]; WINDOW_DAYS],
        }
    }

    pub fn state(&self, day: usize, slot: usize) -> Option<SlotState> {
        self.cells.get(day)?.get(slot).copied()
    }

    /// Slot indices still open on `day`, in declared slot order.
    pub fn open_slots(&self, day: usize) -> Vec<usize> {
        match self.cells.get(day) {
            Some(row) => row
                .iter()
                .enumerate()
                .filter(|(_, state)| state.is_available())
                .map(|(slot, _)| slot)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Open slot labels on `day`, in declared slot order.
    pub fn open_slot_labels(&self, day: usize) -> Vec<&'static str> {
        self.open_slots(day)
            .into_iter()
            .map(|slot| TIME_SLOTS[slot])
            .collect()
    }

    /// Mark a cell booked. Returns false if the cell does not exist or
    /// was already booked.
    pub fn book(&mut self, day: usize, slot: usize) -> bool {
        match self.cells.get_mut(day).and_then(|row| row.get_mut(slot)) {
            Some(cell) if cell.is_available() => {
                *cell = SlotState::Booked;
                true
            }
            _ => false,
        }
    }

    /// Rows in window order, for display.
    pub fn rows(&self) -> impl Iterator<Item = &[SlotState; SLOTS_PER_DAY]> {
        self.cells.iter()
    }

    pub fn booked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|state| !state.is_available())
            .count()
    }
}
