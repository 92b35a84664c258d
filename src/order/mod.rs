//! Layer Linearization
//!
//! Turns a layer's directed acyclic graph of bases into a single resolution
//! order: the layer itself first, then its bases, such that every layer
//! precedes its own bases and the left-to-right declaration order of direct
//! bases is preserved wherever the bases' own orders allow it.
//!
//! The order is computed once, when a layer is built, and never changes:
//! base lists are fixed at construction, so there is nothing to invalidate.

mod merge;

pub(crate) use merge::merge;

use crate::layer::Layer;

/// Linearize the bases of a layer under construction.
///
/// Returns the resolution order *minus* the layer itself (the layer handle
/// does not exist yet while its node is being built; it is always the first
/// element and never appears in any base's order, so it can be prepended
/// afterwards without affecting the merge).
///
/// `None` means the declared base orderings contradict each other and no
/// consistent linearization exists.
pub(crate) fn linearize_bases(bases: &[Layer]) -> Option<Vec<Layer>> {
    let mut sequences = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        sequences.push(base.resolution_order());
    }
    sequences.push(bases.to_vec());
    merge(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;

    #[test]
    fn test_no_bases_linearizes_to_empty_tail() {
        assert!(linearize_bases(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_base_tail_is_base_order() {
        let a = Layer::new("A");
        let tail = linearize_bases(&[a.clone()]).unwrap();
        assert_eq!(tail.len(), 1);
        assert!(tail[0].ptr_eq(&a));
    }
}
