//! In-memory edits of a loaded profile set
//!
//! Add, update and delete are list operations on the working set; the store
//! only ever persists the whole set.

use crate::error::{CoreError, CoreResult};
use crate::profile::Profile;
use std::collections::HashSet;

/// Find a profile by exact name
///
/// # Errors
/// Returns `NotFound` if no profile has that name
pub fn find<'a>(profiles: &'a [Profile], name: &str) -> CoreResult<&'a Profile> {
    profiles
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CoreError::profile_not_found(name))
}

/// Insert a new profile or replace an existing one
///
/// With `original_name` set, the profile stored under that name is replaced
/// in place (allowing a rename). Without it, a profile of the same name is
/// replaced, or the profile is appended.
///
/// # Errors
/// Returns `NotFound` when `original_name` is missing from the set, or
/// `Validation` when the profile is invalid or a rename collides.
pub fn upsert(
    profiles: &mut Vec<Profile>,
    original_name: Option<&str>,
    profile: Profile,
) -> CoreResult<()> {
    profile.validate()?;

    let target = original_name.unwrap_or(&profile.name);
    let index = profiles.iter().position(|p| p.name == target);

    if original_name.is_some() && index.is_none() {
        return Err(CoreError::profile_not_found(target));
    }

    let collides = profiles
        .iter()
        .enumerate()
        .any(|(i, p)| p.name == profile.name && Some(i) != index);
    if collides {
        return Err(CoreError::Validation(format!(
            "A profile named '{}' already exists",
            profile.name
        )));
    }

    match index {
        Some(i) => profiles[i] = profile,
        None => profiles.push(profile),
    }
    Ok(())
}

/// Remove a profile by name, returning it
///
/// # Errors
/// Returns `NotFound` if no profile has that name
pub fn remove(profiles: &mut Vec<Profile>, name: &str) -> CoreResult<Profile> {
    let index = profiles
        .iter()
        .position(|p| p.name == name)
        .ok_or_else(|| CoreError::profile_not_found(name))?;
    Ok(profiles.remove(index))
}

/// First name that appears more than once, if any
#[must_use]
pub fn duplicate_name(profiles: &[Profile]) -> Option<&str> {
    let mut seen = HashSet::new();
    profiles
        .iter()
        .map(|p| p.name.as_str())
        .find(|name| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{default_profiles, NetworkPriority};

    #[test]
    fn test_find() {
        let profiles = default_profiles();
        assert_eq!(find(&profiles, "Wi-Fi").unwrap().name, "Wi-Fi");
        assert!(find(&profiles, "Office").unwrap_err().is_not_found());
    }

    #[test]
    fn test_upsert_appends_new() {
        let mut profiles = default_profiles();
        upsert(&mut profiles, None, Profile::new("Office", NetworkPriority::Ethernet)).unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[2].name, "Office");
    }

    #[test]
    fn test_upsert_replaces_same_name_in_place() {
        let mut profiles = default_profiles();
        upsert(&mut profiles, None, Profile::new("Wired", NetworkPriority::WiFi)).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Wired");
        assert_eq!(profiles[0].network_priority, NetworkPriority::WiFi);
        assert!(!profiles[0].proxy_enabled);
    }

    #[test]
    fn test_upsert_rename() {
        let mut profiles = default_profiles();
        upsert(
            &mut profiles,
            Some("Wired"),
            Profile::new("Desk", NetworkPriority::Ethernet),
        )
        .unwrap();
        assert_eq!(profiles[0].name, "Desk");
        assert!(find(&profiles, "Wired").is_err());
    }

    #[test]
    fn test_upsert_rename_collision() {
        let mut profiles = default_profiles();
        let err = upsert(
            &mut profiles,
            Some("Wired"),
            Profile::new("Wi-Fi", NetworkPriority::Ethernet),
        )
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(profiles, default_profiles());
    }

    #[test]
    fn test_upsert_missing_original() {
        let mut profiles = default_profiles();
        let err = upsert(
            &mut profiles,
            Some("Nope"),
            Profile::new("Desk", NetworkPriority::Ethernet),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove() {
        let mut profiles = default_profiles();
        let removed = remove(&mut profiles, "Wired").unwrap();
        assert_eq!(removed.name, "Wired");
        assert_eq!(profiles.len(), 1);
        assert!(remove(&mut profiles, "Wired").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_name() {
        let mut profiles = default_profiles();
        assert!(duplicate_name(&profiles).is_none());
        profiles.push(Profile::new("Wired", NetworkPriority::WiFi));
        assert_eq!(duplicate_name(&profiles), Some("Wired"));
    }
}
