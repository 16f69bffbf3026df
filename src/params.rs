use bimap::BiMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::OscError;

// One or more non-empty segments, each free of whitespace and the
// characters OSC reserves for pattern matching.
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:/[^\s#*,?\[\]{}/]+)+$").unwrap());

// Names for the global endpoints of the oscmix-style mixer surface.
// Per-strip endpoints ("/input/{n}/volume" and friends) are addressed
// through the device layer instead.
//
// TODO: index-aware lookup so names like "input.3.volume" resolve through
// the registry too, instead of requiring the device layer or a raw address.
static REGISTRY: Lazy<BiMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = BiMap::new();
    map.insert("main.volume", "/main/volume");
    map.insert("main.dim", "/main/dim");
    map.insert("main.mute", "/main/mute");
    map.insert("main.mono", "/main/mono");
    map.insert("reverb.enabled", "/reverb/enabled");
    map.insert("reverb.volume", "/reverb/volume");
    map.insert("echo.enabled", "/echo/enabled");
    map.insert("echo.volume", "/echo/volume");
    map
});

pub fn validate_address(addr: &str) -> Result<(), OscError> {
    if ADDRESS_RE.is_match(addr) {
        Ok(())
    } else {
        Err(OscError::Address(addr.to_string()))
    }
}

/// Turn a parameter name or a raw OSC address into a validated address.
pub fn resolve(param: &str) -> Result<String, OscError> {
    if param.starts_with('/') {
        validate_address(param)?;
        return Ok(param.to_string());
    }
    REGISTRY
        .get_by_left(param)
        .map(|addr| (*addr).to_string())
        .ok_or_else(|| OscError::UnknownParam(param.to_string()))
}

/// The registry name for an address, if it has one.
pub fn describe(addr: &str) -> Option<&'static str> {
    REGISTRY.get_by_right(addr).copied()
}

/// All registry entries, sorted by name.
pub fn all() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<_> = REGISTRY.iter().map(|(name, addr)| (*name, *addr)).collect();
    entries.sort();
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(resolve("main.volume").unwrap(), "/main/volume");
        assert_eq!(resolve("echo.enabled").unwrap(), "/echo/enabled");
    }

    #[test]
    fn passes_through_valid_addresses() {
        assert_eq!(resolve("/input/3/volume").unwrap(), "/input/3/volume");
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            resolve("main volume"),
            Err(OscError::UnknownParam(_))
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(matches!(resolve("/in put/3"), Err(OscError::Address(_))));
        assert!(matches!(validate_address("/"), Err(OscError::Address(_))));
        assert!(matches!(
            validate_address("/input/*/volume"),
            Err(OscError::Address(_))
        ));
        assert!(matches!(validate_address("no/slash"), Err(OscError::Address(_))));
    }

    #[test]
    fn describe_inverts_resolve_for_registry_entries() {
        assert_eq!(describe("/main/dim"), Some("main.dim"));
        assert_eq!(describe("/input/1/volume"), None);
    }

    #[test]
    fn all_is_sorted_by_name() {
        let entries = all();
        assert!(!entries.is_empty());
        let mut sorted = entries.clone();
        sorted.sort();
        assert_eq!(entries, sorted);
    }
}
