//! Domain Services
//!
//! Listing order rules shared by every repository implementation.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::domain::entities::Prompt;
use crate::domain::value_objects::PromptSort;

pub const HOT_LIKE_WEIGHT: i64 = 3;
pub const HOT_COPY_WEIGHT: i64 = 2;
/// A new prompt starts with this bonus, losing one point per full day of age
pub const HOT_RECENCY_DAYS: i64 = 30;

/// `likes*3 + copies*2 + max(0, 30 - age_in_whole_days)`
///
/// Future timestamps count as age zero.
pub fn hot_score(like_count: i64, copy_count: i64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let age_days = (now - created_at).num_days().max(0);
    like_count * HOT_LIKE_WEIGHT
        + copy_count * HOT_COPY_WEIGHT
        + (HOT_RECENCY_DAYS - age_days).max(0)
}

/// Total order used for listings
///
/// Primary key descending, then `created_at` descending, then id.
pub fn compare_prompts(sort: PromptSort, a: &Prompt, b: &Prompt, now: DateTime<Utc>) -> Ordering {
    let primary = match sort {
        PromptSort::CreatedAt => Ordering::Equal,
        PromptSort::LikeCount => b.like_count.cmp(&a.like_count),
        PromptSort::CopyCount => b.copy_count.cmp(&a.copy_count),
        PromptSort::Hot => hot_score(b.like_count, b.copy_count, b.created_at, now)
            .cmp(&hot_score(a.like_count, a.copy_count, a.created_at, now)),
    };

    primary
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
