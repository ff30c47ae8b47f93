//! Advertisement model and DTOs.

use chrono::NaiveDate;
use newsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ads` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Ad {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    pub position: String,
    pub active: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an ad. Omitted dates and flag fall back to the campaign
/// defaults (active, today through today + 30 days).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAd {
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    pub position: String,
    pub active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// DTO for updating an ad. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAd {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub position: Option<String>,
    pub active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
