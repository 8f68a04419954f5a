//! Fame recomputation inside a caller's transaction

use sqlx::{FromRow, PgConnection};
use tracing::debug;

use matcha_core::entities::Profile;
use matcha_core::rules::{compute_fame, FameInputs};
use matcha_core::traits::RepoResult;
use matcha_core::value_objects::UserId;

use crate::models::ProfileModel;

use super::error::map_db_error;

#[derive(Debug, FromRow)]
struct FameCountsRow {
    likes: i64,
    matches: i64,
    views: i64,
    reports: i64,
    blocks: i64,
}

/// Recount a user's interactions, store the new rating and return it
pub(crate) async fn refresh_fame(conn: &mut PgConnection, user_id: UserId) -> RepoResult<i32> {
    let counts = sqlx::query_as::<_, FameCountsRow>(
        r"
        SELECT
            (SELECT COUNT(*) FROM swipes WHERE swiped_id = $1 AND direction = 'like') AS likes,
            (SELECT COUNT(*) FROM matches WHERE user1_id = $1 OR user2_id = $1) AS matches,
            (SELECT COUNT(*) FROM profile_views WHERE viewed_id = $1) AS views,
            (SELECT COUNT(*) FROM reports WHERE reported_id = $1) AS reports,
            (SELECT COUNT(*) FROM blocked_users WHERE blocked_id = $1) AS blocks
        ",
    )
    .bind(user_id.into_inner())
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let profile = sqlx::query_as::<_, ProfileModel>(
        r"
        SELECT user_id, bio, age, gender, sexual_pref, location, latitude, longitude,
               avatar_url, photo1_url, photo2_url, photo3_url, photo4_url, photo5_url
        FROM profiles
        WHERE user_id = $1
        ",
    )
    .bind(user_id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let rating = compute_fame(FameInputs {
        likes: counts.likes,
        matches: counts.matches,
        views: counts.views,
        reports: counts.reports,
        blocks: counts.blocks,
        profile_complete: profile.map(Profile::from).is_some_and(|p| p.is_complete()),
    });

    sqlx::query("UPDATE users SET fame_rating = $2 WHERE user_id = $1")
        .bind(user_id.into_inner())
        .bind(rating)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    debug!(%user_id, rating, "fame rating refreshed");
    Ok(rating)
}
