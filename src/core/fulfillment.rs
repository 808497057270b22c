//! Contribution merge algorithm - The pure core of donation reconciliation.
//!
//! Given a request's current item state and one donor contribution, this
//! module computes the new per-item fulfilled counts and the resulting
//! aggregate status. It is a total function with no side effects and no
//! storage access; the read-modify-write sequencing lives in
//! [`crate::core::donation`].

use crate::core::model::{Contribution, ItemNeed, RequestStatus};

/// Result of merging one contribution into a request's item state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Item state after the contribution was applied
    pub items: Vec<ItemNeed>,
    /// Status derived from the new item state
    pub status: RequestStatus,
}

/// Merges a donor contribution into the current item state and derives
/// the new aggregate status.
///
/// The three contribution shapes are handled as distinct branches:
///
/// * [`Contribution::Itemized`] - each current item is matched against
///   the donated entries by category (the first match wins; categories
///   do not repeat within a request) and the donated quantity is added
///   to its fulfilled count. The addition is deliberately not clamped to
///   the remaining need, so over-donation accumulates past `quantity`.
///   Items with no matching donation, and donations matching no item,
///   are left alone.
/// * [`Contribution::BulkFull`] - a coarse override used by the older
///   contribution flow: every item is marked fulfilled at exactly its
///   requested quantity, regardless of prior progress.
/// * [`Contribution::BulkPartial`] - carries no itemized detail, so the
///   item state cannot be changed; the donation is recorded in history
///   only.
pub fn merge_contribution(current: &[ItemNeed], contribution: &Contribution) -> MergeOutcome {
    let items: Vec<ItemNeed> = match contribution {
        Contribution::Itemized(donated) => current
            .iter()
            .map(|need| {
                donated
                    .iter()
                    .find(|d| d.category == need.category)
                    .map_or(*need, |donation| ItemNeed {
                        fulfilled_count: need.fulfilled_count + donation.quantity,
                        ..*need
                    })
            })
            .collect(),
        Contribution::BulkFull => current
            .iter()
            .map(|need| ItemNeed {
                fulfilled_count: need.quantity,
                ..*need
            })
            .collect(),
        Contribution::BulkPartial => current.to_vec(),
    };

    let status = derive_status(&items);
    MergeOutcome { items, status }
}

/// Derives the aggregate status from an item state.
///
/// `Fulfilled` when every item has reached its quantity (vacuously true
/// for an empty item list), `Partially Fulfilled` when at least one item
/// has any progress, `Pending` otherwise.
pub fn derive_status(items: &[ItemNeed]) -> RequestStatus {
    let all_fulfilled = items.iter().all(|i| i.fulfilled_count >= i.quantity);
    let some_fulfilled = items.iter().any(|i| i.fulfilled_count > 0);

    if all_fulfilled {
        RequestStatus::Fulfilled
    } else if some_fulfilled {
        RequestStatus::PartiallyFulfilled
    } else {
        RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BookCategory, DonatedItem};

    fn need(category: BookCategory, quantity: i32, fulfilled: i32) -> ItemNeed {
        ItemNeed {
            category,
            quantity,
            fulfilled_count: fulfilled,
        }
    }

    fn baseline() -> Vec<ItemNeed> {
        vec![
            need(BookCategory::Textbook, 2, 0),
            need(BookCategory::Exercise, 1, 0),
        ]
    }

    #[test]
    fn itemized_partial_coverage_is_partially_fulfilled() {
        let outcome = merge_contribution(
            &baseline(),
            &Contribution::Itemized(vec![DonatedItem {
                category: BookCategory::Textbook,
                quantity: 2,
            }]),
        );

        assert_eq!(
            outcome.items,
            vec![
                need(BookCategory::Textbook, 2, 2),
                need(BookCategory::Exercise, 1, 0),
            ]
        );
        assert_eq!(outcome.status, RequestStatus::PartiallyFulfilled);
    }

    #[test]
    fn itemized_full_coverage_is_fulfilled() {
        let outcome = merge_contribution(
            &baseline(),
            &Contribution::Itemized(vec![
                DonatedItem {
                    category: BookCategory::Textbook,
                    quantity: 2,
                },
                DonatedItem {
                    category: BookCategory::Exercise,
                    quantity: 1,
                },
            ]),
        );

        assert_eq!(outcome.status, RequestStatus::Fulfilled);
        assert!(outcome.items.iter().all(|i| i.fulfilled_count == i.quantity));
    }

    #[test]
    fn bulk_full_overrides_every_item() {
        let current = vec![
            need(BookCategory::Textbook, 2, 1),
            need(BookCategory::Exercise, 1, 0),
            // Over-fulfilled items are pulled back to their quantity
            need(BookCategory::Stationery, 3, 7),
        ];

        let outcome = merge_contribution(&current, &Contribution::BulkFull);

        assert_eq!(outcome.status, RequestStatus::Fulfilled);
        assert!(outcome.items.iter().all(|i| i.fulfilled_count == i.quantity));
    }

    #[test]
    fn bulk_partial_changes_nothing() {
        let current = vec![
            need(BookCategory::Textbook, 2, 1),
            need(BookCategory::Exercise, 1, 0),
        ];

        let outcome = merge_contribution(&current, &Contribution::BulkPartial);

        assert_eq!(outcome.items, current);
        assert_eq!(outcome.status, RequestStatus::PartiallyFulfilled);
    }

    #[test]
    fn empty_item_list_is_vacuously_fulfilled() {
        assert_eq!(derive_status(&[]), RequestStatus::Fulfilled);

        let outcome = merge_contribution(&[], &Contribution::BulkPartial);
        assert_eq!(outcome.status, RequestStatus::Fulfilled);
    }

    #[test]
    fn over_donation_accumulates_past_quantity() {
        let contribution = Contribution::Itemized(vec![DonatedItem {
            category: BookCategory::Textbook,
            quantity: 5,
        }]);

        let first = merge_contribution(&baseline(), &contribution);
        assert_eq!(first.items[0].fulfilled_count, 5);

        let second = merge_contribution(&first.items, &contribution);
        assert_eq!(second.items[0].fulfilled_count, 10);
        assert_eq!(second.items[0].remaining(), 0);
    }

    #[test]
    fn donation_for_unrequested_category_is_ignored() {
        let outcome = merge_contribution(
            &baseline(),
            &Contribution::Itemized(vec![DonatedItem {
                category: BookCategory::Dictionary,
                quantity: 4,
            }]),
        );

        assert_eq!(outcome.items, baseline());
        assert_eq!(outcome.status, RequestStatus::Pending);
    }

    #[test]
    fn status_only_moves_forward_under_itemized_contributions() {
        let mut items = baseline();
        let mut last_rank = 0;

        let steps = [
            Contribution::Itemized(vec![]),
            Contribution::Itemized(vec![DonatedItem {
                category: BookCategory::Exercise,
                quantity: 1,
            }]),
            Contribution::Itemized(vec![DonatedItem {
                category: BookCategory::Textbook,
                quantity: 1,
            }]),
            Contribution::Itemized(vec![DonatedItem {
                category: BookCategory::Textbook,
                quantity: 1,
            }]),
        ];

        for contribution in &steps {
            let before = items.clone();
            let outcome = merge_contribution(&items, contribution);

            for (old, new) in before.iter().zip(&outcome.items) {
                assert!(new.fulfilled_count >= old.fulfilled_count);
            }

            let rank = match outcome.status {
                RequestStatus::Pending => 0,
                RequestStatus::PartiallyFulfilled => 1,
                RequestStatus::Fulfilled => 2,
                RequestStatus::Matched => unreachable!("derivation never produces Matched"),
            };
            assert!(rank >= last_rank);

            last_rank = rank;
            items = outcome.items;
        }

        assert_eq!(last_rank, 2);
    }
}
