use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::order::PaymentMethod;

/// Highest day of month a monthly schedule may use, so it fires every month.
pub const MAX_MONTHLY_DAY: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// How often a recurring delivery repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly { day: Weekday },
    Monthly {
        #[serde(rename = "dayOfMonth")]
        day_of_month: u32,
    },
}

impl Frequency {
    pub fn is_valid(&self) -> bool {
        match self {
            Frequency::Monthly { day_of_month } => (1..=MAX_MONTHLY_DAY).contains(day_of_month),
            _ => true,
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Frequency::Daily => true,
            Frequency::Weekly { day } => Weekday::from(date.weekday()) == *day,
            Frequency::Monthly { day_of_month } => date.day() == *day_of_month,
        }
    }
}

/// Delivery window within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    /// 8AM - 11AM
    Morning,
    /// 12PM - 3PM
    Afternoon,
    /// 4PM - 7PM
    Evening,
}

/// A standing instruction to place an order on every matching day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySchedule {
    pub id: String,
    pub customer_id: String,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub frequency: Frequency,
    pub slot: TimeSlot,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Date of the last order this schedule produced.
    pub last_placed_on: Option<NaiveDate>,
}

impl DeliverySchedule {
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.active && self.last_placed_on != Some(date) && self.frequency.matches(date)
    }
}

/// A schedule request, as submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub customer_id: String,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub frequency: Frequency,
    pub slot: TimeSlot,
}

/// Payload for creating a new schedule.
#[derive(Debug, Clone)]
pub struct ScheduleCreate {
    pub customer_id: String,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub frequency: Frequency,
    pub slot: TimeSlot,
    pub created_at: DateTime<Utc>,
}
