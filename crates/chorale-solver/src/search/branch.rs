//! Variable and value selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use chorale_config::ValueSelection;

use crate::domain::DomainStore;
use crate::model::BranchVar;
use crate::var::IntVar;

/// Returns the first unfixed variable of the branching order, falling back
/// to the first unfixed variable of the model so that every solution is a
/// complete assignment.
pub(crate) fn select_variable(branching: &[BranchVar], store: &DomainStore) -> Option<BranchVar> {
    branching
        .iter()
        .find(|b| !store.is_fixed(b.var))
        .copied()
        .or_else(|| {
            (0..store.var_count() as u32)
                .map(IntVar)
                .find(|&var| !store.is_fixed(var))
                .map(|var| BranchVar { var, hint: None })
        })
}

pub(crate) fn select_value(
    selection: ValueSelection,
    branch: BranchVar,
    store: &DomainStore,
    rng: &mut ChaCha8Rng,
) -> i64 {
    let var = branch.var;
    match selection {
        ValueSelection::Min => store.min(var),
        ValueSelection::Max => store.max(var),
        ValueSelection::Random => {
            let k = rng.random_range(0..store.size(var)) as usize;
            store.values(var).nth(k).unwrap_or_else(|| store.min(var))
        }
        ValueSelection::Nearest => match branch.hint.and_then(|h| store.value(h)) {
            Some(target) => store
                .values(var)
                .min_by_key(|&v| ((v - target).abs(), v))
                .unwrap_or_else(|| store.min(var)),
            None => median(store, var),
        },
    }
}

fn median(store: &DomainStore, var: IntVar) -> i64 {
    let k = (store.size(var) / 2) as usize;
    store.values(var).nth(k).unwrap_or_else(|| store.min(var))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::domain::ValueSet;

    fn store() -> (DomainStore, IntVar, IntVar) {
        let mut store = DomainStore::new();
        let x = store.add_var(&[48, 52, 55, 60, 64].into_iter().collect::<ValueSet>());
        let h = store.add_range(57, 57);
        (store, x, h)
    }

    #[test]
    fn test_nearest_uses_hint() {
        let (store, x, h) = store();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let branch = BranchVar {
            var: x,
            hint: Some(h),
        };
        assert_eq!(
            select_value(ValueSelection::Nearest, branch, &store, &mut rng),
            55
        );
        let unhinted = BranchVar { var: x, hint: None };
        assert_eq!(
            select_value(ValueSelection::Nearest, unhinted, &store, &mut rng),
            55
        );
        assert_eq!(
            select_value(ValueSelection::Max, unhinted, &store, &mut rng),
            64
        );
    }

    #[test]
    fn test_random_value_is_in_domain() {
        let (store, x, _) = store();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let branch = BranchVar { var: x, hint: None };
        for _ in 0..20 {
            let v = select_value(ValueSelection::Random, branch, &store, &mut rng);
            assert!(store.contains(x, v));
        }
    }

    #[test]
    fn test_fallback_variable_selection() {
        let (store, x, h) = store();
        let order = [BranchVar { var: h, hint: None }];
        assert_eq!(select_variable(&order, &store).map(|b| b.var), Some(x));
    }
}
