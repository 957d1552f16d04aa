use billfinder_core::category::Category;
use billfinder_core::models::demographics::Demographics;
use billfinder_query::filter::matches;

fn ages(values: &[&str]) -> Demographics {
    Demographics::new().with(Category::AgeGroups, values.iter().copied())
}

#[test]
fn overlapping_age_group_matches() {
    assert!(matches(&ages(&["19-25"]), Some(&ages(&["19-25", "41-65"]))));
}

#[test]
fn empty_bill_category_rejects() {
    assert!(!matches(&ages(&["19-25"]), Some(&ages(&[]))));
}

#[test]
fn missing_bill_category_rejects() {
    let bill = Demographics::new().with(Category::Gender, ["Female"]);
    assert!(!matches(&ages(&["19-25"]), Some(&bill)));
}

#[test]
fn unclassified_bill_never_matches_a_selection() {
    assert!(!matches(&ages(&["19-25"]), None));
}

#[test]
fn blank_selection_matches_everything() {
    assert!(matches(&Demographics::new(), None));
    assert!(matches(&ages(&[]), Some(&ages(&["65+"]))));
}

#[test]
fn every_constrained_category_must_intersect() {
    let selection = ages(&["19-25"]).with(Category::Location, ["Texas"]);
    let bill = ages(&["19-25"]).with(Category::Location, ["Ohio"]);
    assert!(!matches(&selection, Some(&bill)));

    let bill = ages(&["19-25"]).with(Category::Location, ["Ohio", "Texas"]);
    assert!(matches(&selection, Some(&bill)));
}

#[test]
fn disjoint_values_reject() {
    assert!(!matches(&ages(&["65+"]), Some(&ages(&["19-25"]))));
}

#[test]
fn other_groups_do_not_constrain() {
    let selection = ages(&["19-25"]).with(Category::OtherGroups, ["veterans"]);
    assert!(matches(&selection, Some(&ages(&["19-25"]))));

}

#[test]
fn other_groups_alone_match_nothing() {
    let only_other = Demographics::new().with(Category::OtherGroups, ["veterans"]);
    assert!(!matches(&only_other, Some(&ages(&["65+"]))));
    assert!(!matches(&only_other, Some(&Demographics::new())));
    assert!(!matches(&only_other, None));
}

#[test]
fn empty_user_categories_are_ignored() {
    let selection = ages(&["19-25"]).with(Category::Gender, Vec::<String>::new());
    assert!(matches(&selection, Some(&ages(&["19-25"]))));
}
