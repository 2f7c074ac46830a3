use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of components in an ecosystem.
pub const COMPONENT_COUNT: usize = 8;

/// Role of a component within the ecosystem.
///
/// The declaration order is the canonical role ordering shared by every
/// reference set, registry and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentIdentity {
    /// Insurance pool; owns the audit log.
    Pool,
    /// Bond component.
    Bond,
    /// Bank component.
    Bank,
    /// Policy component.
    Policy,
    /// Settlement component.
    Settlement,
    /// Adjustor component.
    Adjustor,
    /// Timer component.
    Timer,
    /// Trust component; the daylight-saving coordinator.
    Trust,
}

impl ComponentIdentity {
    /// All roles in canonical order.
    pub const ALL: [ComponentIdentity; COMPONENT_COUNT] = [
        ComponentIdentity::Pool,
        ComponentIdentity::Bond,
        ComponentIdentity::Bank,
        ComponentIdentity::Policy,
        ComponentIdentity::Settlement,
        ComponentIdentity::Adjustor,
        ComponentIdentity::Timer,
        ComponentIdentity::Trust,
    ];

    /// Position in the canonical ordering (0..8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Role name as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            ComponentIdentity::Pool => "pool",
            ComponentIdentity::Bond => "bond",
            ComponentIdentity::Bank => "bank",
            ComponentIdentity::Policy => "policy",
            ComponentIdentity::Settlement => "settlement",
            ComponentIdentity::Adjustor => "adjustor",
            ComponentIdentity::Timer => "timer",
            ComponentIdentity::Trust => "trust",
        }
    }
}

/// Error parsing a role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for ComponentIdentity {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ComponentIdentity::ALL
            .into_iter()
            .find(|role| role.name() == lower)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentIdentity::Pool => "Pool",
            ComponentIdentity::Bond => "Bond",
            ComponentIdentity::Bank => "Bank",
            ComponentIdentity::Policy => "Policy",
            ComponentIdentity::Settlement => "Settlement",
            ComponentIdentity::Adjustor => "Adjustor",
            ComponentIdentity::Timer => "Timer",
            ComponentIdentity::Trust => "Trust",
        };
        f.write_str(name)
    }
}
