use chrono::NaiveDate;

/// Custom actions for delivery schedules.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleAction {
    /// Stops the schedule from producing orders.
    Pause,
    /// Lets a paused schedule produce orders again.
    Resume,
    /// Records that the schedule has produced its order for the given date.
    ///
    /// # Errors
    /// Fails if the schedule is not due on that date, so a date can be
    /// claimed at most once.
    ClaimDate(NaiveDate),
    /// Undoes a `ClaimDate` whose order could not be placed, restoring the
    /// date the schedule last placed an order for.
    ///
    /// # Errors
    /// Fails unless `date` is the schedule's current claim.
    ReleaseClaim {
        date: NaiveDate,
        previous: Option<NaiveDate>,
    },
}
