//! Logical index registry.
//!
//! Records live in named logical indices. The backend maps a logical index to
//! a physical one (see the Elasticsearch backend's `physical_index`); the
//! query builder refuses to build against an index that is not listed here.

/// Logical index holding person records.
pub const PERSON_INDEX: &str = "person";

/// Logical index holding vehicle records.
pub const VEHICLE_INDEX: &str = "vehicle";

/// All logical indices the store recognizes.
pub const KNOWN_INDICES: &[&str] = &[PERSON_INDEX, VEHICLE_INDEX];

/// Returns whether `name` is a recognized logical index.
pub fn is_known(name: &str) -> bool {
    KNOWN_INDICES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_indices_are_recognized() {
        assert!(is_known(PERSON_INDEX));
        assert!(is_known(VEHICLE_INDEX));
    }

    #[test]
    fn unknown_and_empty_names_are_rejected() {
        assert!(!is_known("spaceship"));
        assert!(!is_known(""));
        assert!(!is_known("Vehicle")); // logical names are lowercase
    }
}
