//! Title rating aggregation
//!
//! The rating is never stored. Each read computes it from the review totals
//! selected with the title row.

use crate::models::title::{Title, TitleRecord};

/// Mean score from a score sum and a review count. No reviews means no
/// rating, which is not the same as a rating of 0.
pub fn rating(score_sum: Option<i64>, review_count: i64) -> Option<f64> {
    if review_count <= 0 {
        return None;
    }
    score_sum.map(|sum| sum as f64 / review_count as f64)
}

/// Build the read model of a title
pub fn to_title(record: TitleRecord) -> Title {
    let TitleRecord { row, genres } = record;
    let category = row.category();
    Title {
        id: row.id,
        rating: rating(row.score_sum, row.review_count),
        name: row.name,
        year: row.year,
        description: row.description,
        genre: genres,
        category,
    }
}
