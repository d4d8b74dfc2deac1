// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::ReviewRow;
use crate::diesel_schema::review;
use crate::error::PersistenceError;
use crate::queries::page_bounds;
use tender_market_domain::{Feedback, Page};

/// Lists reviews written by a username, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_feedback_by_author(
    conn: &mut SqliteConnection,
    author_username: &str,
    page: Page,
) -> Result<Vec<Feedback>, PersistenceError> {
    let (limit, offset) = page_bounds(page);

    let rows: Vec<ReviewRow> = review::table
        .filter(review::author_username.eq(author_username))
        .select(ReviewRow::as_select())
        .order((review::created_at.desc(), review::id.asc()))
        .limit(limit)
        .offset(offset)
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_feedback_by_author: {e}")))?;

    Ok(rows.into_iter().map(Feedback::from).collect())
}
