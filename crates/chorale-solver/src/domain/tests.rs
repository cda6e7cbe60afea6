use super::*;

#[test]
fn test_range_domain() {
    let mut store = DomainStore::new();
    let x = store.add_range(-12, 12);
    assert_eq!(store.min(x), -12);
    assert_eq!(store.max(x), 12);
    assert_eq!(store.size(x), 25);
    assert!(store.contains(x, 0));
    assert!(!store.contains(x, 13));
    assert!(!store.is_fixed(x));
}

#[test]
fn test_wide_domain_spans_words() {
    let mut store = DomainStore::new();
    let x = store.add_range(0, 127);
    assert_eq!(store.size(x), 128);
    assert_eq!(store.max(x), 127);

    store.retain(x, |v| v % 12 == 7).unwrap();
    let values: Vec<i64> = store.values(x).collect();
    assert_eq!(values, vec![7, 19, 31, 43, 55, 67, 79, 91, 103, 115, 127]);
    assert_eq!(store.min(x), 7);
    assert_eq!(store.max(x), 127);
}

#[test]
fn test_explicit_domain() {
    let mut store = DomainStore::new();
    let set: ValueSet = [60, 64, 67, 72].into_iter().collect();
    let x = store.add_var(&set);
    assert_eq!(store.to_set(x), set);
    assert!(store.is_subset_of(x, &ValueSet::range(60, 72)));
    assert!(store.is_disjoint_from(x, &ValueSet::range(61, 63)));
}

#[test]
fn test_bounds_and_assignment() {
    let mut store = DomainStore::new();
    let x = store.add_range(0, 10);

    assert_eq!(store.set_min(x, 3), Ok(true));
    assert_eq!(store.set_min(x, 2), Ok(false));
    assert_eq!(store.set_max(x, 5), Ok(true));
    assert_eq!(store.to_set(x), ValueSet::range(3, 5));

    assert_eq!(store.remove(x, 4), Ok(true));
    assert_eq!(store.remove(x, 4), Ok(false));
    assert_eq!(store.assign(x, 4), Err(Failure));
    assert_eq!(store.assign(x, 5), Ok(true));
    assert_eq!(store.value(x), Some(5));
}

#[test]
fn test_emptying_fails() {
    let mut store = DomainStore::new();
    let x = store.add_range(0, 3);
    assert_eq!(store.set_min(x, 4), Err(Failure));

    let y = store.add_range(0, 3);
    assert_eq!(store.restrict_to(y, &ValueSet::range(10, 20)), Err(Failure));
}

#[test]
fn test_modifications_are_recorded() {
    let mut store = DomainStore::new();
    let x = store.add_range(0, 3);
    let y = store.add_range(0, 3);
    store.clear_modified();

    store.set_max(y, 1).unwrap();
    store.set_max(x, 3).unwrap();
    let mut out = Vec::new();
    store.drain_modified(&mut out);
    assert_eq!(out, vec![y.0]);
    assert!(!store.has_modified());
}

#[test]
fn test_clones_are_independent() {
    let mut store = DomainStore::new();
    let x = store.add_range(0, 3);
    let mut copy = store.clone();
    copy.assign(x, 2).unwrap();
    assert_eq!(store.size(x), 4);
    assert_eq!(copy.value(x), Some(2));
}

#[test]
fn test_value_set_operations() {
    let a: ValueSet = [5, 1, 3, 3].into_iter().collect();
    let b = ValueSet::range(3, 6);
    assert_eq!(a.as_slice(), &[1, 3, 5]);
    assert_eq!(a.union(&b).as_slice(), &[1, 3, 4, 5, 6]);
    assert_eq!(a.intersection(&b).as_slice(), &[3, 5]);
    assert_eq!(a.difference(&b).as_slice(), &[1]);
    assert_eq!(ValueSet::singleton(9).min(), Some(9));
    assert!(ValueSet::new().is_empty());
}
