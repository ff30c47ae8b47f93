//! Replace-all persistence for ordered lists.
//!
//! Saving a ticker or carousel never updates rows in place. Every row that
//! is currently active is flagged inactive, then the full submitted list is
//! inserted as fresh active rows. Superseded rows stay in the table as
//! history.
//!
//! In [`ReplaceMode::TwoPhase`] the two statements run one after the other
//! on the pool with no surrounding transaction. If the insert fails after
//! the deactivation succeeded, the list is left with zero active rows until
//! the next successful save. [`ReplaceMode::Atomic`] runs both statements in
//! one transaction instead.

use std::fmt;
use std::str::FromStr;

use newsdesk_core::content::ListKind;
use newsdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// All-zero id excluded from the bulk deactivation filter. No real row
/// carries it.
pub const SENTINEL_ID: DbId = DbId::nil();

/// How the deactivate and insert steps of a save are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Two independent statements against the pool.
    #[default]
    TwoPhase,
    /// Both statements inside a single transaction.
    Atomic,
}

impl ReplaceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoPhase => "two_phase",
            Self::Atomic => "atomic",
        }
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplaceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two_phase" | "two-phase" => Ok(Self::TwoPhase),
            "atomic" => Ok(Self::Atomic),
            other => Err(format!(
                "Unknown replace mode '{other}'. Expected 'two_phase' or 'atomic'"
            )),
        }
    }
}

/// Flag every active row of `kind` as inactive. Returns the number of rows
/// touched.
pub async fn deactivate_active(
    conn: &mut PgConnection,
    kind: ListKind,
) -> Result<u64, sqlx::Error> {
    let query = format!(
        "UPDATE {} SET active = false WHERE active = true AND id <> $1",
        kind.table()
    );
    let result = sqlx::query(&query).bind(SENTINEL_ID).execute(conn).await?;
    Ok(result.rows_affected())
}

/// Count the active rows of `kind`.
pub async fn count_active(pool: &PgPool, kind: ListKind) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {} WHERE active = true", kind.table());
    let row: (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
    Ok(row.0)
}
