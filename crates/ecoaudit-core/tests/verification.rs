use ecoaudit_canonical::Address;
use ecoaudit_core::{
    verify, verify_parallel, ComponentIdentity, ComponentRegistry, ComponentView,
    DiscrepancyKind, ReferenceSet, ReferenceSets,
};
use proptest::prelude::*;

fn make_address(n: u8) -> Address {
    Address::parse(format!("0x{}", format!("{:02x}", n).repeat(20))).unwrap()
}

fn make_registry() -> ComponentRegistry {
    ComponentRegistry::new(std::array::from_fn(|i| make_address(i as u8 + 1))).unwrap()
}

/// A component whose references can be rewired.
struct FakeComponent {
    references: ReferenceSet,
}

impl ComponentView for FakeComponent {
    fn component_address(&self, role: ComponentIdentity) -> Option<Address> {
        self.references.get(role).cloned()
    }
}

#[test]
fn test_consistent_ecosystem_has_empty_report() {
    let registry = make_registry();
    let components: Vec<_> = ComponentIdentity::ALL
        .into_iter()
        .map(|role| {
            (
                role,
                FakeComponent {
                    references: ReferenceSet::query(&registry),
                },
            )
        })
        .collect();
    let sets = ReferenceSets::collect(components.iter().map(|(role, c)| (*role, c)));

    let report = verify(&registry, &sets);
    assert!(report.is_consistent());
    assert!(report.into_result().is_ok());
}

#[test]
fn test_bond_with_swapped_bank_and_policy() {
    let registry = make_registry();
    let mut sets = ReferenceSets::uniform(&registry);
    let bank = registry.address(ComponentIdentity::Bank).clone();
    let policy = registry.address(ComponentIdentity::Policy).clone();
    let bond_view = sets.get_mut(ComponentIdentity::Bond).unwrap();
    bond_view.set(ComponentIdentity::Bank, Some(policy.clone()));
    bond_view.set(ComponentIdentity::Policy, Some(bank.clone()));

    let report = verify(&registry, &sets);
    assert_eq!(report.len(), 2);

    let first = &report.discrepancies()[0];
    assert_eq!(first.reporter, ComponentIdentity::Bond);
    assert_eq!(first.role, ComponentIdentity::Bank);
    assert_eq!(first.expected, bank);
    assert_eq!(first.actual, Some(policy.clone()));
    assert_eq!(first.kind, DiscrepancyKind::ReferenceMismatch);

    let second = &report.discrepancies()[1];
    assert_eq!(second.reporter, ComponentIdentity::Bond);
    assert_eq!(second.role, ComponentIdentity::Policy);
    assert_eq!(second.expected, policy);
    assert_eq!(second.actual, Some(bank));
}

#[test]
fn test_all_discrepancies_reported_across_reporters() {
    let registry = make_registry();
    let mut sets = ReferenceSets::uniform(&registry);
    let stale = make_address(0xee);
    sets.get_mut(ComponentIdentity::Pool)
        .unwrap()
        .set(ComponentIdentity::Timer, Some(stale.clone()));
    sets.get_mut(ComponentIdentity::Trust)
        .unwrap()
        .set(ComponentIdentity::Pool, Some(stale.clone()));
    sets.get_mut(ComponentIdentity::Trust)
        .unwrap()
        .set(ComponentIdentity::Trust, Some(stale));

    let report = verify(&registry, &sets);
    let pairs: Vec<_> = report
        .discrepancies()
        .iter()
        .map(|d| (d.reporter, d.role))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (ComponentIdentity::Pool, ComponentIdentity::Timer),
            (ComponentIdentity::Trust, ComponentIdentity::Pool),
            (ComponentIdentity::Trust, ComponentIdentity::Trust),
        ]
    );
}

#[test]
fn test_missing_reporter_yields_entry_per_role() {
    let registry = make_registry();
    let mut sets = ReferenceSets::uniform(&registry);
    sets.remove(ComponentIdentity::Settlement);

    let report = verify(&registry, &sets);
    assert_eq!(report.len(), 8);
    for (d, role) in report.discrepancies().iter().zip(ComponentIdentity::ALL) {
        assert_eq!(d.reporter, ComponentIdentity::Settlement);
        assert_eq!(d.role, role);
        assert_eq!(&d.expected, registry.address(role));
        assert_eq!(d.actual, None);
        assert_eq!(d.kind, DiscrepancyKind::MissingReferenceSet);
    }
}

#[test]
fn test_self_reference_is_checked() {
    let registry = make_registry();
    let mut sets = ReferenceSets::uniform(&registry);
    sets.get_mut(ComponentIdentity::Pool)
        .unwrap()
        .set(ComponentIdentity::Pool, None);

    let report = verify(&registry, &sets);
    assert_eq!(report.len(), 1);
    assert_eq!(report.discrepancies()[0].reporter, ComponentIdentity::Pool);
    assert_eq!(report.discrepancies()[0].role, ComponentIdentity::Pool);
}

#[test]
fn test_empty_collection_reports_every_pair() {
    let registry = make_registry();
    let report = verify(&registry, &ReferenceSets::new());
    assert_eq!(report.len(), 64);
    assert_eq!(report.missing_reporters(), ComponentIdentity::ALL.to_vec());
}

fn arb_role() -> impl Strategy<Value = ComponentIdentity> {
    (0usize..8).prop_map(|i| ComponentIdentity::ALL[i])
}

fn arb_sets() -> impl Strategy<Value = ReferenceSets> {
    // Each corruption rewrites one (reporter, role) entry or drops a reporter.
    let corruption = (arb_role(), arb_role(), prop::option::of(1u8..=12), any::<bool>());
    prop::collection::vec(corruption, 0..12).prop_map(|corruptions| {
        let registry = make_registry();
        let mut sets = ReferenceSets::uniform(&registry);
        for (reporter, role, value, drop_reporter) in corruptions {
            if drop_reporter {
                sets.remove(reporter);
            } else if let Some(set) = sets.get_mut(reporter) {
                set.set(role, value.map(make_address));
            }
        }
        sets
    })
}

proptest! {
    #[test]
    fn prop_report_lists_exactly_the_disagreeing_pairs(sets in arb_sets()) {
        let registry = make_registry();
        let report = verify(&registry, &sets);

        let mut expected = Vec::new();
        for reporter in ComponentIdentity::ALL {
            for role in ComponentIdentity::ALL {
                let actual = sets.get(reporter).and_then(|s| s.get(role));
                if actual != Some(registry.address(role)) {
                    expected.push((reporter, role));
                }
            }
        }
        let got: Vec<_> = report.discrepancies().iter().map(|d| (d.reporter, d.role)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_verify_is_idempotent(sets in arb_sets()) {
        let registry = make_registry();
        prop_assert_eq!(verify(&registry, &sets), verify(&registry, &sets));
    }

    #[test]
    fn prop_parallel_matches_sequential(sets in arb_sets()) {
        let registry = make_registry();
        prop_assert_eq!(verify_parallel(&registry, &sets), verify(&registry, &sets));
    }
}
