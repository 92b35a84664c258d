//! C3-style sequence merge
//!
//! The same merge that linearizes class hierarchies in C3 MRO schemes,
//! expressed over explicit layer sequences instead of a language's own
//! inheritance machinery. Layer identity is pointer identity: two handles
//! denote the same merge element iff they point at the same node.

use crate::layer::Layer;

/// Merge candidate sequences into a single consistent order.
///
/// Repeatedly emits the head of the first sequence whose head does not
/// appear in the tail (non-head position) of any other sequence, then strips
/// that element from the head of every sequence where it leads. Trying
/// candidates in the order the sequences are given is what preserves
/// left-to-right base precedence.
///
/// Returns `None` when every remaining head appears in some tail: the
/// declared orderings contradict each other and no consistent order exists.
/// No order is guessed in that case.
pub(crate) fn merge(mut sequences: Vec<Vec<Layer>>) -> Option<Vec<Layer>> {
    let mut result = Vec::new();

    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Some(result);
        }

        let candidate = sequences
            .iter()
            .map(|seq| seq[0].clone())
            .find(|head| !sequences.iter().any(|seq| in_tail(seq, head)))?;

        result.push(candidate.clone());
        for seq in &mut sequences {
            if seq[0].ptr_eq(&candidate) {
                seq.remove(0);
            }
        }
    }
}

fn in_tail(seq: &[Layer], layer: &Layer) -> bool {
    seq.iter().skip(1).any(|other| other.ptr_eq(layer))
}
