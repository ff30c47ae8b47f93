//! Advertisement slot constants and validation.

use chrono::{Days, NaiveDate};

use crate::content::is_http_url;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Position constants
// ---------------------------------------------------------------------------

pub const POSITION_SIDE: &str = "side";
pub const POSITION_BOTTOM: &str = "bottom";
pub const POSITION_POPUP: &str = "popup";

/// All valid ad positions.
pub const VALID_POSITIONS: &[&str] = &[POSITION_SIDE, POSITION_BOTTOM, POSITION_POPUP];

/// Default campaign length for a new ad.
pub const DEFAULT_CAMPAIGN_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an ad position against the known set.
pub fn validate_position(position: &str) -> Result<(), CoreError> {
    if !VALID_POSITIONS.contains(&position) {
        return Err(CoreError::Validation(format!(
            "Invalid position '{}'. Valid positions: {}",
            position,
            VALID_POSITIONS.join(", ")
        )));
    }
    Ok(())
}

/// Validate that the campaign window is not inverted.
pub fn validate_window(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "End date {end} is before start date {start}"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Ad title must not be empty".into()));
    }
    Ok(())
}

/// Validate a link or image URL for an ad.
pub fn validate_url(field: &str, url: &str) -> Result<(), CoreError> {
    if is_http_url(url.trim()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} '{url}' must be an http(s) URL"
        )))
    }
}

/// Default campaign window for a new ad: today through today + 30 days.
pub fn default_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(DEFAULT_CAMPAIGN_DAYS))
        .unwrap_or(today);
    (today, end)
}

/// Whether an ad should be served on `day`.
pub fn is_running(active: bool, start: NaiveDate, end: NaiveDate, day: NaiveDate) -> bool {
    active && start <= day && day <= end
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn positions() {
        for p in VALID_POSITIONS {
            assert!(validate_position(p).is_ok());
        }
        assert!(validate_position("header").is_err());
    }

    #[test]
    fn window_ordering() {
        assert!(validate_window(date(2026, 1, 1), date(2026, 1, 1)).is_ok());
        assert!(validate_window(date(2026, 1, 2), date(2026, 1, 1)).is_err());
    }

    #[test]
    fn default_window_is_thirty_days() {
        let (start, end) = default_window(date(2026, 1, 15));
        assert_eq!(start, date(2026, 1, 15));
        assert_eq!(end, date(2026, 2, 14));
    }

    #[test]
    fn running_respects_flag_and_dates() {
        let (s, e) = (date(2026, 3, 1), date(2026, 3, 31));
        assert!(is_running(true, s, e, date(2026, 3, 31)));
        assert!(!is_running(false, s, e, date(2026, 3, 10)));
        assert!(!is_running(true, s, e, date(2026, 4, 1)));
    }

    #[test]
    fn urls() {
        assert!(validate_url("Link URL", "https://shop.example.com").is_ok());
        assert!(validate_url("Link URL", "shop.example.com").is_err());
    }
}
