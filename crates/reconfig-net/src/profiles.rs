//! Desired-profile registry
//!
//! Two built-in network profiles, one per deployer. Each profile is an
//! ordered list of (interface slot, vNIC template) pairs; the declaration
//! order determines the host-visible device enumeration order.

use crate::error::AppError;

/// One desired interface: slot name and the template it binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSlot {
    pub name: &'static str,
    pub template: &'static str,
}

/// Named, ordered set of desired interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    pub name: &'static str,
    pub slots: &'static [ProfileSlot],
}

/// Interfaces with assigned vNIC templates, per deployer
static PROFILES: &[NetworkProfile] = &[
    NetworkProfile {
        name: "FUEL",
        slots: &[
            ProfileSlot { name: "eth0", template: "fuel-public" },
            ProfileSlot { name: "eth1", template: "fuel-tagged" },
        ],
    },
    NetworkProfile {
        name: "FOREMAN",
        slots: &[
            ProfileSlot { name: "eth0", template: "foreman-storage" },
            ProfileSlot { name: "eth1", template: "foreman-control" },
            ProfileSlot { name: "eth2", template: "foreman-public" },
            ProfileSlot { name: "eth3", template: "foreman-traffic" },
        ],
    },
];

/// Look up a registered profile by name, case-insensitively
pub fn lookup(name: &str) -> Result<&'static NetworkProfile, AppError> {
    PROFILES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| AppError::UnknownProfile(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lower = lookup("fuel").expect("lowercase lookup should succeed");
        let upper = lookup("FUEL").expect("uppercase lookup should succeed");
        assert_eq!(lower, upper);
        assert_eq!(lower.name, "FUEL");
    }

    #[test]
    fn test_lookup_unknown_profile_fails() {
        let err = lookup("bogus").unwrap_err();
        assert!(matches!(err, AppError::UnknownProfile(ref name) if name == "bogus"));
    }

    #[test]
    fn test_fuel_profile_slots_in_declaration_order() {
        let profile = lookup("FUEL").unwrap();
        let slots: Vec<(&str, &str)> = profile.slots.iter().map(|s| (s.name, s.template)).collect();
        assert_eq!(slots, vec![("eth0", "fuel-public"), ("eth1", "fuel-tagged")]);
    }

    #[test]
    fn test_foreman_profile_has_four_slots() {
        let profile = lookup("foreman").unwrap();
        assert_eq!(profile.slots.len(), 4);
        assert_eq!(profile.slots[3].name, "eth3");
        assert_eq!(profile.slots[3].template, "foreman-traffic");
    }
}
