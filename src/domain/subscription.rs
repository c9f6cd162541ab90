//! Recurring-payment schedules and their iCalendar encoding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Day,
    Week,
    Month,
    Year,
}

impl Frequency {
    fn rrule_freq(&self) -> &'static str {
        match self {
            Self::Day => "DAILY",
            Self::Week => "WEEKLY",
            Self::Month => "MONTHLY",
            Self::Year => "YEARLY",
        }
    }
}

/// Schedule of a recurring payment, plus the gateway-side state that
/// accumulates as occurrences are notified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionInfos {
    /// Amount of each occurrence, smallest currency unit.
    pub amount: u64,
    pub begin_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    count: u32,
    month_day: Option<u32>,
    interval: u32,
    /// Gateway identifier, bound when the registration is notified.
    pub identifier: Option<String>,
    pub last_recurrence_number: Option<u32>,
    responses: Vec<FieldSet>,
}

impl SubscriptionInfos {
    pub fn new(amount: u64, begin_date: NaiveDate, frequency: Frequency) -> Self {
        Self {
            amount,
            begin_date,
            end_date: None,
            frequency,
            count: 0,
            month_day: None,
            interval: 1,
            identifier: None,
            last_recurrence_number: None,
            responses: Vec::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of occurrences, zero meaning unbounded. Negative input
    /// clamps to zero.
    pub fn set_count(&mut self, count: i64) {
        self.count = count.max(0) as u32;
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval;
    }

    pub fn month_day(&self) -> Option<u32> {
        self.month_day
    }

    /// Day of the month an occurrence falls on, clamped into `1..=31`.
    pub fn set_month_day(&mut self, day: i64) {
        self.month_day = Some(day.clamp(1, 31) as u32);
    }

    /// Raw notification bodies received for this subscription, oldest first.
    pub fn responses(&self) -> &[FieldSet] {
        &self.responses
    }

    pub fn push_response(&mut self, fields: FieldSet) {
        self.responses.push(fields);
    }

    /// Encodes the schedule as an iCalendar RRULE, the format the gateway
    /// expects in `vads_sub_desc`.
    ///
    /// A month day of 29, 30 or 31 expands to `BYMONTHDAY=28,...,day` so
    /// that months too short for the requested day still bill on the 28th.
    pub fn recurrence_rule(&self) -> String {
        let mut rule = format!("RRULE:FREQ={};", self.frequency.rrule_freq());
        if matches!(self.frequency, Frequency::Month | Frequency::Year) {
            if let Some(day) = self.month_day {
                let mut days: Vec<String> = (28..day).map(|d| d.to_string()).collect();
                days.push(day.to_string());
                rule.push_str(&format!("BYMONTHDAY={};", days.join(",")));
            }
        }
        if self.count > 0 {
            rule.push_str(&format!("COUNT={};", self.count));
        }
        rule.push_str(&format!("INTERVAL={};", self.interval));
        if let Some(end) = self.end_date {
            rule.push_str(&format!("UNTIL={};", end.format("%Y%m%d")));
        }
        rule
    }
}
