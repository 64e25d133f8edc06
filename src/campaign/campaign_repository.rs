use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::campaign;

use super::campaign_model::{CampaignClockDB, CampaignDate, ClockChange};
use super::campaign_traits::ClockProvider;

// The clock is a single row, seeded by the migrations.
const CLOCK_ROW_ID: i32 = 1;

/// Repository for the persisted campaign clock
pub struct CampaignRepository {
    pool: Arc<DbPool>,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Reads the current campaign date
    pub fn get_clock(&self) -> Result<CampaignDate> {
        let mut conn = get_connection(&self.pool)?;

        let row = campaign::table
            .find(CLOCK_ROW_ID)
            .first::<CampaignClockDB>(&mut conn)?;

        Ok(row.into())
    }

    /// Moves the clock and returns the change that occurred
    pub fn set_clock(&self, date: CampaignDate) -> Result<ClockChange> {
        if date.day < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Campaign day must be positive, got {}",
                date.day
            ))));
        }

        let mut conn = get_connection(&self.pool)?;

        let previous: CampaignDate = campaign::table
            .find(CLOCK_ROW_ID)
            .first::<CampaignClockDB>(&mut conn)?
            .into();

        diesel::update(campaign::table.find(CLOCK_ROW_ID))
            .set((
                campaign::current_day.eq(date.day),
                campaign::current_year.eq(date.year),
                campaign::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(ClockChange {
            previous,
            current: date,
        })
    }
}

impl ClockProvider for CampaignRepository {
    fn current_date(&self) -> Result<CampaignDate> {
        self.get_clock()
    }
}
