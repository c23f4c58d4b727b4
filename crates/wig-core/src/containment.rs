//! # Location Containment Rules
//!
//! Locations form a forest per owner: each points at most at one container.
//! Placing a location inside another must keep the forest acyclic.
//!
//! ```text
//!   Garage ◄── Shelf ◄── Bin A          set_container(Garage, Bin A)?
//!                                        ancestors(Bin A) = [Shelf, Garage]
//!                                        Garage ∈ ancestors → cycle, reject
//! ```

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Rejects a location being its own container. Checked before any lookup.
pub fn check_not_self(location_id: &str, container_id: &str) -> ValidationResult<()> {
    if location_id == container_id {
        return Err(ValidationError::ContainmentCycle {
            location_id: location_id.to_string(),
            container_id: container_id.to_string(),
        });
    }

    Ok(())
}

/// Rejects placements that would close a cycle.
///
/// `container_ancestors` is the chain of containers above `container_id`,
/// nearest first, not including `container_id` itself.
pub fn check_placement<'a, I>(
    location_id: &str,
    container_id: &str,
    container_ancestors: I,
) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    check_not_self(location_id, container_id)?;

    if container_ancestors.into_iter().any(|id| id == location_id) {
        return Err(ValidationError::ContainmentCycle {
            location_id: location_id.to_string(),
            container_id: container_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_reference_rejected() {
        assert!(check_not_self("a", "a").is_err());
        assert!(check_not_self("a", "b").is_ok());
    }

    #[test]
    fn test_ancestor_cycle_rejected() {
        // b is inside a; putting a inside b closes a -> b -> a
        assert!(check_placement("a", "b", ["a"]).is_err());
        // deeper: c in b in a; a into c
        assert!(check_placement("a", "c", ["b", "a"]).is_err());
    }

    #[test]
    fn test_valid_placement() {
        assert!(check_placement("d", "c", ["b", "a"]).is_ok());
        assert!(check_placement("d", "c", std::iter::empty()).is_ok());
    }
}
