//! Review ledger and its label-indexed form

use crate::{DomainError, LabelSpace, Review, ReviewSource};
use std::collections::HashMap;

/// The input collection of reviews for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewLedger {
    reviews: Vec<Review>,
}

impl ReviewLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge reviews from several sources, in the order given
    ///
    /// Human ledgers and rule-based or LLM triage "reviewers" combine here
    /// without special-casing either kind.
    pub fn from_sources<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn ReviewSource>,
    {
        let mut ledger = Self::new();
        for source in sources {
            ledger.extend(source.reviews());
        }
        ledger
    }

    /// Append one review
    pub fn push(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Number of reviews
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Whether the ledger holds no reviews
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Borrow the raw reviews
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Check every review against the label space and resolve ids to indices
    ///
    /// Items and reviewers are numbered by first appearance. Fails on the
    /// first review whose label is not in `labels`.
    pub fn index(&self, labels: &LabelSpace) -> Result<IndexedLedger, DomainError> {
        let mut items = Vec::new();
        let mut reviewers = Vec::new();
        let mut item_index: HashMap<&str, usize> = HashMap::new();
        let mut reviewer_index: HashMap<&str, usize> = HashMap::new();
        let mut reviews = Vec::with_capacity(self.reviews.len());

        for review in &self.reviews {
            let label = labels
                .index_of(&review.label)
                .ok_or_else(|| DomainError::UnknownLabel {
                    item_id: review.item_id.clone(),
                    reviewer_id: review.reviewer_id.clone(),
                    label: review.label.clone(),
                })?;

            let item = *item_index.entry(review.item_id.as_str()).or_insert_with(|| {
                items.push(review.item_id.clone());
                items.len() - 1
            });
            let reviewer = *reviewer_index
                .entry(review.reviewer_id.as_str())
                .or_insert_with(|| {
                    reviewers.push(review.reviewer_id.clone());
                    reviewers.len() - 1
                });

            reviews.push(IndexedReview {
                item,
                reviewer,
                label,
            });
        }

        let mut by_item = vec![Vec::new(); items.len()];
        let mut by_reviewer = vec![Vec::new(); reviewers.len()];
        for review in &reviews {
            by_item[review.item].push(*review);
            by_reviewer[review.reviewer].push(*review);
        }

        Ok(IndexedLedger {
            items,
            reviewers,
            review_count: reviews.len(),
            by_item,
            by_reviewer,
        })
    }
}

impl Extend<Review> for ReviewLedger {
    fn extend<T: IntoIterator<Item = Review>>(&mut self, iter: T) {
        self.reviews.extend(iter);
    }
}

impl FromIterator<Review> for ReviewLedger {
    fn from_iter<T: IntoIterator<Item = Review>>(iter: T) -> Self {
        Self {
            reviews: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Review>> for ReviewLedger {
    fn from(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }
}

/// A review with item, reviewer and label resolved to indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedReview {
    /// Item index
    pub item: usize,
    /// Reviewer index
    pub reviewer: usize,
    /// Observed label index
    pub label: usize,
}

/// A validated ledger grouped by item and by reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLedger {
    items: Vec<String>,
    reviewers: Vec<String>,
    review_count: usize,
    by_item: Vec<Vec<IndexedReview>>,
    by_reviewer: Vec<Vec<IndexedReview>>,
}

impl IndexedLedger {
    /// Item ids in first-appearance order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Reviewer ids in first-appearance order
    pub fn reviewers(&self) -> &[String] {
        &self.reviewers
    }

    /// Total number of reviews
    pub fn review_count(&self) -> usize {
        self.review_count
    }

    /// Reviews of one item
    pub fn reviews_of_item(&self, item: usize) -> &[IndexedReview] {
        &self.by_item[item]
    }

    /// Reviews issued by one reviewer
    pub fn reviews_by_reviewer(&self, reviewer: usize) -> &[IndexedReview] {
        &self.by_reviewer[reviewer]
    }
}
