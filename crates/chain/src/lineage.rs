//! Decay chain discovery and the resulting lineage
//!
//! Starting from a progenitor, every radiation type is searched for
//! daughters, the daughters inherit the levels they are fed at, and the
//! search continues down each daughter in turn.

// standard library
use std::collections::BTreeMap;

// external crates
use log::{debug, trace, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

// rnlib modules
use rnlib_iaea::{DataProvider, Nuclide, RadType, RecordSet};
use rnlib_utils::{f, UniqueExt};

// internal modules
use crate::context::RunContext;
use crate::error::{tolerate, Result};
use crate::levels::SourceTag;

/// Parent to daughter relationships found during discovery
///
/// A forest of progenitor roots. A nuclide can be reached by more than one
/// path, so it may appear at several positions in the rendered tree.
#[derive(Debug, Clone, Default)]
pub struct LineageTree {
    roots: Vec<Nuclide>,
    edges: BTreeMap<Nuclide, Vec<Nuclide>>,
}

impl LineageTree {
    /// Add a progenitor, returning false if it was already a root
    pub fn add_root(&mut self, nuclide: &Nuclide) -> bool {
        self.roots.push_unique(nuclide.clone())
    }

    /// Add a decay relationship, returning false if known or a self edge
    pub fn add_edge(&mut self, parent: &Nuclide, daughter: &Nuclide) -> bool {
        let parent = parent.intrinsic();
        let daughter = daughter.intrinsic();
        if parent == daughter {
            return false;
        }
        self.edges.entry(parent).or_default().push_unique(daughter)
    }

    /// Progenitors in the order they were added
    pub fn roots(&self) -> &[Nuclide] {
        &self.roots
    }

    /// Direct daughters of a nuclide in the order they were found
    pub fn daughters(&self, nuclide: &Nuclide) -> &[Nuclide] {
        self.edges
            .get(&nuclide.intrinsic())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Nested view of everything descending from a nuclide
    ///
    /// Branches stop at any nuclide already on the path from the root.
    pub fn render(&self, root: &Nuclide) -> LineageNode {
        self.render_node(root, &mut Vec::new())
    }

    fn render_node(&self, nuclide: &Nuclide, path: &mut Vec<Nuclide>) -> LineageNode {
        path.push(nuclide.intrinsic());
        let mut daughters = Vec::new();
        for daughter in self.daughters(nuclide) {
            if !path.contains(daughter) {
                daughters.push(self.render_node(daughter, path));
            }
        }
        path.pop();

        LineageNode {
            nuclide: nuclide.clone(),
            daughters,
        }
    }
}

/// One nuclide of a rendered lineage and everything below it
///
/// Serialised as nested maps keyed by nuclide name.
///
/// ```yaml
/// Mo-99:
///   Tc-99:
///     Ru-99: {}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineageNode {
    /// Nuclide at this position
    pub nuclide: Nuclide,
    /// Rendered daughters in order of discovery
    pub daughters: Vec<LineageNode>,
}

impl LineageNode {
    /// Every nuclide in the subtree, depth first, including repeats
    pub fn flatten(&self) -> Vec<&Nuclide> {
        let mut nuclides = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nuclides.push(&node.nuclide);
            stack.extend(node.daughters.iter().rev());
        }
        nuclides
    }
}

impl Serialize for LineageNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.nuclide, &Branches(&self.daughters))?;
        map.end()
    }
}

struct Branches<'a>(&'a [LineageNode]);

impl Serialize for Branches<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for node in self.0 {
            map.serialize_entry(&node.nuclide, &Branches(&node.daughters))?;
        }
        map.end()
    }
}

/// Pending nuclide and the chain of ancestors that led to it
#[derive(Debug)]
struct Frame {
    nuclide: Nuclide,
    path: Vec<Nuclide>,
}

/// Find every nuclide reachable by decay from a parent
///
/// The result lists the direct daughters of the parent, followed by the
/// result for each of those daughters in turn. A daughter reached through
/// several branches appears once per branch, but never twice among the
/// direct daughters of one nuclide.
///
/// Along the way the lineage tree, neighbour lists, inherited levels, gamma
/// cascades, and decay modes in the context are all filled in. A daughter
/// that is already one of its own ancestors is not searched again.
pub fn discover<P: DataProvider>(
    context: &mut RunContext,
    provider: &mut P,
    parent: &Nuclide,
) -> Result<Vec<Nuclide>> {
    let mut found = Vec::new();
    let mut stack = vec![Frame {
        nuclide: parent.intrinsic(),
        path: Vec::new(),
    }];

    while let Some(frame) = stack.pop() {
        let daughters = direct_daughters(context, provider, &frame.nuclide)?;
        debug!("{} decays to {daughters:?}", frame.nuclide);
        found.extend(daughters.iter().cloned());

        let mut path = frame.path;
        path.push(frame.nuclide);

        for daughter in daughters.into_iter().rev() {
            if path.contains(&daughter) {
                warn!("{daughter} decays back into itself, not searched again");
                continue;
            }
            stack.push(Frame {
                nuclide: daughter,
                path: path.clone(),
            });
        }
    }

    Ok(found)
}

/// Search every radiation type of one nuclide for its daughters
fn direct_daughters<P: DataProvider>(
    context: &mut RunContext,
    provider: &mut P,
    parent: &Nuclide,
) -> Result<Vec<Nuclide>> {
    let parent_levels = {
        let entry = context.registry.entry(parent);
        entry.flatten();
        entry.flattened_levels.clone()
    };

    let mut daughters = Vec::new();
    for rad_type in RadType::ALL {
        if provider.is_unavailable(parent, rad_type) {
            trace!("{parent} {rad_type} is unavailable");
            continue;
        }

        let what = f!("{parent} {rad_type}");
        let Some(records) = tolerate(provider.decay_radiation(parent, rad_type), what)? else {
            continue;
        };

        for daughter in candidates(&records, parent) {
            if daughters.push_unique(daughter.clone()) {
                context.lineage.add_edge(parent, &daughter);
            }
            context.registry.entry(parent).daughters.push_unique(daughter.clone());

            let fed = fed_levels(&records, &daughter, &parent_levels);
            let entry = context.registry.entry(&daughter);
            entry.parents.push_unique(parent.clone());
            let added = entry.inherit(SourceTag::Parent(parent.clone()), fed);
            trace!("{daughter} inherited {added} levels from {parent} {rad_type}");

            context.resolve_levels(provider, &daughter)?;
        }
    }

    Ok(daughters)
}

/// Distinct daughters named in a table, in row order, excluding the parent
fn candidates(records: &RecordSet, parent: &Nuclide) -> Vec<Nuclide> {
    let mut daughters = Vec::new();
    for daughter in records.iter().filter_map(|r| r.daughter()) {
        if daughter != *parent {
            daughters.push_unique(daughter);
        }
    }
    daughters
}

/// Daughter levels fed from levels the parent can actually be in
fn fed_levels(records: &RecordSet, daughter: &Nuclide, parent_levels: &[f64]) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.daughter().as_ref() == Some(daughter))
        .filter(|r| r.p_energy.is_some_and(|e| parent_levels.contains(&e)))
        .filter_map(|r| r.daughter_level_energy)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn nuclide(name: &str) -> Nuclide {
        Nuclide::from_str(name).unwrap()
    }

    #[test]
    fn edges_are_unique_and_never_self() {
        let mut tree = LineageTree::default();
        let (mo99, tc99) = (nuclide("Mo-99"), nuclide("Tc-99"));

        assert!(tree.add_root(&mo99));
        assert!(!tree.add_root(&mo99));
        assert!(tree.add_edge(&mo99, &tc99));
        assert!(!tree.add_edge(&mo99, &tc99.isomer()));
        assert!(!tree.add_edge(&tc99, &tc99.isomer()));

        assert_eq!(tree.roots(), &[mo99.clone()]);
        assert_eq!(tree.daughters(&mo99), &[tc99.clone()]);
        assert!(tree.daughters(&tc99).is_empty());
    }

    #[test]
    fn render_stops_at_cycles() {
        let mut tree = LineageTree::default();
        let (a, b) = (nuclide("Fr-221"), nuclide("At-217"));
        tree.add_edge(&a, &b);
        tree.add_edge(&b, &a);

        let node = tree.render(&a);
        assert_eq!(node.flatten(), vec![&a, &b]);
        assert!(node.daughters[0].daughters.is_empty());
    }

    #[test]
    fn candidates_skip_parent_and_repeats() {
        let row = |symbol: &str, z: u16, n: u16| rnlib_iaea::Record {
            d_symbol: Some(symbol.to_string()),
            d_z: Some(z),
            d_n: Some(n),
            ..Default::default()
        };
        let records = vec![
            row("Tc", 43, 56),
            row("Mo", 42, 57),
            row("Tc", 43, 56),
            rnlib_iaea::Record::default(),
        ];

        assert_eq!(candidates(&records, &nuclide("Mo-99")), vec![nuclide("Tc-99")]);
    }

    #[test]
    fn fed_levels_need_a_reachable_parent_level() {
        let row = |p_energy: f64, level: f64| rnlib_iaea::Record {
            p_energy: Some(p_energy),
            daughter_level_energy: Some(level),
            d_symbol: Some("Tc".to_string()),
            d_z: Some(43),
            d_n: Some(56),
            ..Default::default()
        };
        let records = vec![row(0.0, 142.6836), row(0.0, 0.0), row(97.785, 181.0)];

        assert_eq!(
            fed_levels(&records, &nuclide("Tc-99"), &[0.0]),
            vec![142.6836, 0.0]
        );
        assert!(fed_levels(&records, &nuclide("Ru-99"), &[0.0]).is_empty());
    }
}
