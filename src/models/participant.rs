//! Study participant model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One participant's diagnosis period and geographic partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantWindow {
    /// Join key; `None` when the population table carries a null identifier
    pub person_id: Option<String>,
    /// First three digits of the participant's postal code
    pub zip3: Option<String>,
    /// First day of the diagnosis period
    pub start_date: NaiveDate,
    /// Last day of the diagnosis period
    pub end_date: NaiveDate,
}

impl ParticipantWindow {
    /// Create a participant with a join key and zip3
    pub fn new(
        person_id: impl Into<String>,
        zip3: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            person_id: Some(person_id.into()),
            zip3: Some(zip3.into()),
            start_date,
            end_date,
        }
    }
}
