use billfinder_core::category::Category;
use billfinder_core::models::demographics::Demographics;

/// Categories of `selection` that constrain matching: non-empty and not
/// `other_groups`.
pub fn constraints(selection: &Demographics) -> impl Iterator<Item = (Category, &[String])> {
    selection
        .iter()
        .filter(|(category, values)| category.is_matchable() && !values.is_empty())
}

/// Whether a bill's classification satisfies a user's selection.
///
/// A blank selection matches every bill. Otherwise a bill without a
/// classification never matches, and for every constraining category the
/// bill must list at least one of the selected values. A bill with no
/// values for a constrained category is rejected, and a selection with
/// nothing but `other_groups` matches nothing.
pub fn matches(selection: &Demographics, bill: Option<&Demographics>) -> bool {
    if selection.is_blank() {
        return true;
    }
    let Some(bill) = bill else {
        return false;
    };

    let mut constrained = false;
    for (category, wanted) in constraints(selection) {
        constrained = true;
        let offered = bill.get(category);
        if offered.is_empty() || !wanted.iter().any(|w| offered.contains(w)) {
            return false;
        }
    }
    constrained
}
