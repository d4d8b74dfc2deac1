// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::data_models::ReviewRow;
use crate::diesel_schema::review;
use crate::error::PersistenceError;
use crate::mutations::{new_id, now_timestamp};
use tender_market_domain::Feedback;

/// Appends a review keyed by its writer's username.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn append_feedback(
    conn: &mut SqliteConnection,
    author_username: &str,
    description: &str,
) -> Result<Feedback, PersistenceError> {
    let row = ReviewRow {
        id: new_id(),
        description: description.to_string(),
        author_username: author_username.to_string(),
        created_at: now_timestamp()?,
    };

    diesel::insert_into(review::table)
        .values(&row)
        .execute(conn)?;

    info!(feedback_id = %row.id, author_username, "Feedback recorded");
    Ok(row.into())
}
