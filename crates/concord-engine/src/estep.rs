//! Expectation step

use concord_domain::{Distribution, IndexedLedger, Model};

/// Posterior over true labels for every item, given a fixed model
///
/// score(t) = prior[t] × Π confusion[reviewer][t][observed] over the item's
/// reviews, normalized across labels. The product is accumulated as a sum of
/// logs so items with hundreds of reviews do not underflow. Results are
/// aligned with `ledger.items()`.
pub fn e_step(model: &Model, ledger: &IndexedLedger) -> Vec<Distribution> {
    let size = model.labels().len();
    (0..ledger.items().len())
        .map(|item| {
            let reviews = ledger.reviews_of_item(item);
            let log_weights = (0..size)
                .map(|t| {
                    reviews.iter().fold(model.priors().get(t).ln(), |score, review| {
                        score + model.confusion_matrix(review.reviewer).get(t, review.label).ln()
                    })
                })
                .collect();
            Distribution::from_log_weights(log_weights)
        })
        .collect()
}
