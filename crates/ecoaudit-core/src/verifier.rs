//! Ecosystem cross-reference verification.
//!
//! Every component must hold the registry's address for every role,
//! including its own. The check is total: each `(reporter, role)` pair is
//! compared and every disagreement is reported, in `(reporter, role)` order.

use ecoaudit_canonical::Address;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::identity::ComponentIdentity;
use crate::reference::{ReferenceSet, ReferenceSets};
use crate::registry::ComponentRegistry;

/// Why a `(reporter, role)` pair failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// The reporter holds a different address than the registry (or none).
    ReferenceMismatch,
    /// The reporter returned no reference set at all.
    MissingReferenceSet,
}

/// One disagreement between a component's view and the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Component whose view is wrong.
    pub reporter: ComponentIdentity,
    /// Role whose address is wrong.
    pub role: ComponentIdentity,
    /// Registry address for `role`.
    pub expected: Address,
    /// Address the reporter holds; `None` if it reported nothing.
    pub actual: Option<Address>,
    /// Classification.
    pub kind: DiscrepancyKind,
}

/// Result of a verification pass. Empty means the ecosystem is consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    discrepancies: Vec<Discrepancy>,
}

impl VerificationReport {
    /// All discrepancies ordered by reporter, then role.
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// True when no discrepancy was found.
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Number of discrepancies.
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    /// True when the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Discrepancies raised by one reporter.
    pub fn for_reporter(
        &self,
        reporter: ComponentIdentity,
    ) -> impl Iterator<Item = &Discrepancy> + '_ {
        self.discrepancies
            .iter()
            .filter(move |d| d.reporter == reporter)
    }

    /// Reporters that were absent.
    pub fn missing_reporters(&self) -> Vec<ComponentIdentity> {
        let mut reporters: Vec<_> = self
            .discrepancies
            .iter()
            .filter(|d| d.kind == DiscrepancyKind::MissingReferenceSet)
            .map(|d| d.reporter)
            .collect();
        reporters.dedup();
        reporters
    }

    /// Maps a non-empty report to [`CoreError::EcosystemInconsistent`].
    ///
    /// An ecosystem must not be considered live until this returns `Ok`.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_consistent() {
            Ok(())
        } else {
            Err(CoreError::EcosystemInconsistent {
                count: self.discrepancies.len(),
            })
        }
    }

    fn extend(&mut self, discrepancies: Vec<Discrepancy>) {
        self.discrepancies.extend(discrepancies);
    }
}

/// Checks every reference set against the registry.
///
/// Pure function of its inputs; calling it twice yields identical reports.
pub fn verify(registry: &ComponentRegistry, reference_sets: &ReferenceSets) -> VerificationReport {
    let mut report = VerificationReport::default();
    for reporter in ComponentIdentity::ALL {
        report.extend(check_reporter(
            registry,
            reporter,
            reference_sets.get(reporter),
        ));
    }
    summarize(&report);
    report
}

/// Same as [`verify`], with each reporter checked on its own thread.
///
/// Results are merged in canonical reporter order, so the report is identical
/// to the sequential one.
pub fn verify_parallel(
    registry: &ComponentRegistry,
    reference_sets: &ReferenceSets,
) -> VerificationReport {
    let per_reporter: Vec<Vec<Discrepancy>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ComponentIdentity::ALL
            .into_iter()
            .map(|reporter| {
                scope.spawn(move || {
                    check_reporter(registry, reporter, reference_sets.get(reporter))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut report = VerificationReport::default();
    for discrepancies in per_reporter {
        report.extend(discrepancies);
    }
    summarize(&report);
    report
}

fn check_reporter(
    registry: &ComponentRegistry,
    reporter: ComponentIdentity,
    set: Option<&ReferenceSet>,
) -> Vec<Discrepancy> {
    let Some(set) = set else {
        debug!(%reporter, "reporter absent");
        return ComponentIdentity::ALL
            .into_iter()
            .map(|role| Discrepancy {
                reporter,
                role,
                expected: registry.address(role).clone(),
                actual: None,
                kind: DiscrepancyKind::MissingReferenceSet,
            })
            .collect();
    };

    let mut discrepancies = Vec::new();
    for (role, expected) in registry.iter() {
        let actual = set.get(role);
        if actual != Some(expected) {
            debug!(
                %reporter,
                %role,
                expected = %expected,
                actual = actual.map(Address::as_str).unwrap_or("<none>"),
                "reference mismatch"
            );
            discrepancies.push(Discrepancy {
                reporter,
                role,
                expected: expected.clone(),
                actual: actual.cloned(),
                kind: DiscrepancyKind::ReferenceMismatch,
            });
        }
    }
    discrepancies
}

fn summarize(report: &VerificationReport) {
    if report.is_consistent() {
        info!("ecosystem cross-references consistent");
    } else {
        warn!(
            count = report.len(),
            "ecosystem cross-references inconsistent"
        );
    }
}
