//! Gamma cascade traversal
//!
//! Follows successive gamma transitions down from a starting level to find
//! every level that can be reached on the way to the ground state.

// standard library
use std::collections::HashMap;

// external crates
use log::trace;

// rnlib modules
use rnlib_iaea::GammaTransition;

/// Every end level reached from a start level, with multiplicity
///
/// Transitions whose start level interval contains the level are followed,
/// and each of their end levels is resolved in turn. The result for a level is
/// the result of every branch in table order, followed by the direct end
/// levels of that level.
///
/// A level reached by more than one path appears once per path. Only
/// downward transitions are followed, so overlapping intervals can not loop.
///
/// ```rust
/// # use rnlib_chain::resolve_end_levels;
/// # use rnlib_iaea::GammaTransition;
/// let transition = |start: f64, end: f64| GammaTransition {
///     start_level_energy: Some(start),
///     end_level_energy: Some(end),
///     ..Default::default()
/// };
///
/// // Tc-99, 142.68 keV decays directly and through 140.51 keV
/// let gammas = vec![
///     transition(142.6836, 0.0),
///     transition(142.6836, 140.511),
///     transition(140.511, 0.0),
/// ];
///
/// assert_eq!(
///     resolve_end_levels(&gammas, 142.6836),
///     vec![0.0, 0.0, 140.511]
/// );
/// assert!(resolve_end_levels(&gammas, 0.0).is_empty());
/// ```
pub fn resolve_end_levels(transitions: &[GammaTransition], start_level: f64) -> Vec<f64> {
    // results for levels already resolved, keyed by bit pattern
    let mut resolved: HashMap<u64, Vec<f64>> = HashMap::new();
    let mut stack = vec![Frame::new(transitions, start_level)];

    while let Some(frame) = stack.last_mut() {
        // descend into the next branch
        if let Some(&end) = frame.ends.get(frame.next) {
            frame.next += 1;
            if end >= frame.level {
                continue;
            }
            match resolved.get(&end.to_bits()) {
                Some(result) => frame.tally.extend_from_slice(result),
                None => stack.push(Frame::new(transitions, end)),
            }
            continue;
        }

        // every branch of this level is done
        if let Some(done) = stack.pop() {
            let mut result = done.tally;
            result.extend_from_slice(&done.ends);
            trace!("Level {} cascades to {result:?}", done.level);

            match stack.last_mut() {
                Some(parent) => parent.tally.extend_from_slice(&result),
                None => return result,
            }
            resolved.insert(done.level.to_bits(), result);
        }
    }

    Vec::new()
}

/// Traversal state for one level
#[derive(Debug)]
struct Frame {
    level: f64,
    ends: Vec<f64>,
    next: usize,
    tally: Vec<f64>,
}

impl Frame {
    fn new(transitions: &[GammaTransition], level: f64) -> Self {
        let ends = transitions
            .iter()
            .filter(|t| t.start_interval().is_some_and(|i| i.contains(level)))
            .filter_map(|t| t.end_level_energy)
            .collect();

        Self {
            level,
            ends,
            next: 0,
            tally: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(start: f64, unc: Option<f64>, end: f64) -> GammaTransition {
        GammaTransition {
            start_level_energy: Some(start),
            unc_sle: unc,
            end_level_energy: Some(end),
            ..Default::default()
        }
    }

    #[test]
    fn branches_keep_multiplicity() {
        // S -> E1 -> T and S -> E2 -> T
        let gammas = vec![
            transition(300.0, None, 200.0),
            transition(300.0, None, 100.0),
            transition(200.0, None, 0.0),
            transition(100.0, None, 0.0),
        ];
        assert_eq!(
            resolve_end_levels(&gammas, 300.0),
            vec![0.0, 0.0, 200.0, 100.0]
        );
    }

    #[test]
    fn single_chain_is_followed() {
        let gammas = vec![
            transition(300.0, None, 200.0),
            transition(200.0, None, 100.0),
            transition(100.0, None, 0.0),
        ];
        assert_eq!(
            resolve_end_levels(&gammas, 300.0),
            vec![0.0, 100.0, 200.0]
        );
    }

    #[test]
    fn start_uncertainty_widens_match() {
        let gammas = vec![transition(142.68, Some(0.5), 0.0)];
        assert_eq!(resolve_end_levels(&gammas, 142.5), vec![0.0]);
        assert!(resolve_end_levels(&gammas, 142.0).is_empty());
    }

    #[test]
    fn upward_rows_are_not_followed() {
        // malformed data that would otherwise cycle forever
        let gammas = vec![
            transition(100.0, Some(50.0), 120.0),
            transition(120.0, Some(50.0), 100.0),
        ];
        assert_eq!(resolve_end_levels(&gammas, 100.0), vec![120.0, 100.0]);
    }

    #[test]
    fn shared_sublevels_resolved_once() {
        // a deep shared tail reached through three branches
        let gammas = vec![
            transition(400.0, None, 300.0),
            transition(400.0, None, 200.0),
            transition(400.0, None, 100.0),
            transition(300.0, None, 100.0),
            transition(200.0, None, 100.0),
            transition(100.0, None, 0.0),
        ];
        let ends = resolve_end_levels(&gammas, 400.0);
        assert_eq!(ends.iter().filter(|e| **e == 0.0).count(), 3);
        assert_eq!(ends.iter().filter(|e| **e == 100.0).count(), 3);
        assert_eq!(&ends[ends.len() - 3..], &[300.0, 200.0, 100.0]);
    }
}
