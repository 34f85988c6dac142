//! Product review state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use evershop_core::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::storage::{self, StateStore, keys};

/// Direction of a helpfulness vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpfulVote {
    Helpful,
    Unhelpful,
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Display name of the reviewer.
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    /// Whether the reviewer bought the product.
    pub verified: bool,
    /// Count of helpful votes.
    pub helpful: u32,
    /// Count of unhelpful votes.
    pub unhelpful: u32,
    /// The current user's vote on this review, if any.
    #[serde(rename = "userHelpfulVote", default, skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<HelpfulVote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reviewer-supplied fields for a new review.
///
/// The store fills in the id, zeroed vote counters and timestamps.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    /// Star rating; clamped to 1 to 5 on submission.
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verified: bool,
}

/// Aggregate rating statistics for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    /// Unrounded mean star rating; 0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: usize,
    /// Review counts for one through five stars.
    pub rating_distribution: [u32; 5],
}

impl ReviewSummary {
    const EMPTY: Self = Self {
        average_rating: 0.0,
        total_reviews: 0,
        rating_distribution: [0; 5],
    };
}

/// Review collection across all products.
///
/// Each user tracks a single helpfulness vote per review; re-voting the
/// same way withdraws the vote, voting the other way moves it.
pub struct ReviewStore {
    reviews: Vec<Review>,
    storage: Arc<dyn StateStore>,
}

impl ReviewStore {
    /// Loads persisted reviews, starting empty when nothing usable is
    /// stored.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>) -> Self {
        let reviews = storage::load_collection(storage.as_ref(), keys::REVIEWS);
        Self { reviews, storage }
    }

    /// Submits a review and returns its generated id.
    pub fn add_review(&mut self, review: NewReview) -> ReviewId {
        let now = Utc::now();
        let id = ReviewId::new(ids::entity_id());
        self.reviews.push(Review {
            id: id.clone(),
            product_id: review.product_id,
            user_id: review.user_id,
            user_name: review.user_name,
            user_avatar: review.user_avatar,
            rating: review.rating.clamp(1, 5),
            title: review.title,
            content: review.content,
            pros: review.pros,
            cons: review.cons,
            verified: review.verified,
            helpful: 0,
            unhelpful: 0,
            user_vote: None,
            created_at: now,
            updated_at: now,
        });
        self.persist();
        id
    }

    /// Reviews for one product, newest submissions last.
    #[must_use]
    pub fn product_reviews(&self, product_id: &ProductId) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| &review.product_id == product_id)
            .collect()
    }

    /// All reviews across products.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Aggregates rating statistics for one product.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn summary(&self, product_id: &ProductId) -> ReviewSummary {
        let reviews = self.product_reviews(product_id);
        if reviews.is_empty() {
            return ReviewSummary::EMPTY;
        }

        let mut distribution = [0_u32; 5];
        let mut star_sum = 0_u32;
        for review in &reviews {
            star_sum += u32::from(review.rating);
            if let Some(slot) = distribution.get_mut(usize::from(review.rating).wrapping_sub(1)) {
                *slot += 1;
            }
        }

        ReviewSummary {
            average_rating: f64::from(star_sum) / reviews.len() as f64,
            total_reviews: reviews.len(),
            rating_distribution: distribution,
        }
    }

    /// Records the current user's helpfulness vote on a review.
    ///
    /// A repeat of the standing vote withdraws it; the opposite vote
    /// moves it. Unknown review ids are ignored.
    pub fn vote(&mut self, review_id: &ReviewId, vote: HelpfulVote) {
        let Some(review) = self.reviews.iter_mut().find(|review| &review.id == review_id) else {
            return;
        };

        match review.user_vote {
            Some(previous) if previous == vote => {
                Self::retract(review, previous);
                review.user_vote = None;
            }
            Some(previous) => {
                Self::retract(review, previous);
                Self::count(review, vote);
                review.user_vote = Some(vote);
            }
            None => {
                Self::count(review, vote);
                review.user_vote = Some(vote);
            }
        }
        self.persist();
    }

    fn counter(review: &mut Review, vote: HelpfulVote) -> &mut u32 {
        match vote {
            HelpfulVote::Helpful => &mut review.helpful,
            HelpfulVote::Unhelpful => &mut review.unhelpful,
        }
    }

    fn count(review: &mut Review, vote: HelpfulVote) {
        *Self::counter(review, vote) += 1;
    }

    fn retract(review: &mut Review, vote: HelpfulVote) {
        let counter = Self::counter(review, vote);
        *counter = counter.saturating_sub(1);
    }

    fn persist(&self) {
        if let Err(error) =
            storage::persist_value(self.storage.as_ref(), keys::REVIEWS, &self.reviews)
        {
            tracing::error!(%error, "failed to persist reviews");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
