//! End to end generation of one library dataset

// external crates
use log::{debug, info, warn};

// rnlib modules
use rnlib_iaea::{DataProvider, Nuclide};
use rnlib_utils::UniqueExt;

// internal modules
use crate::assemble::{assemble, AssemblyOptions, LibraryRow};
use crate::config::{LibraryConfig, Progenitor};
use crate::context::RunContext;
use crate::error::Result;
use crate::feasibility::evaluate;
use crate::lineage::{discover, LineageNode};

/// Decay chain of a single recursive progenitor
#[derive(Debug, Clone, PartialEq)]
pub struct DecayChain {
    /// Progenitor as given by the user
    pub progenitor: Progenitor,
    /// Progenitor followed by every distinct nuclide found below it
    pub nuclides: Vec<Nuclide>,
}

/// Everything produced for one dataset
#[derive(Debug)]
pub struct Library {
    /// Final library rows
    pub rows: Vec<LibraryRow>,
    /// Distinct intrinsic nuclides the rows were drawn from, in order
    pub subset: Vec<Nuclide>,
    /// Decay chain of every recursive progenitor
    pub chains: Vec<DecayChain>,
    /// Level registry and lineage built along the way
    pub context: RunContext,
}

impl Library {
    /// Rendered lineage of every recursive progenitor
    pub fn lineages(&self) -> Vec<(&Progenitor, LineageNode)> {
        self.chains
            .iter()
            .map(|c| (&c.progenitor, self.context.lineage.render(&c.progenitor.nuclide)))
            .collect()
    }
}

/// Generate the library for a dataset configuration
///
/// 1. Static progenitors get their levels, gamma cascades, and decay modes
/// 2. Recursive progenitors do the same, and their decay chains are
///    discovered
/// 3. Feasibility of every decay mode is evaluated
/// 4. The subset is the chains followed by the static progenitors, without
///    duplicates or excluded nuclides
/// 5. Rows are assembled from the subset
///
/// Configuration problems are caught before any data are requested.
pub fn generate<P: DataProvider>(config: &LibraryConfig, provider: &mut P) -> Result<Library> {
    config.validate()?;
    let statics = config.static_progenitors()?;
    let recursive = config.recursive_progenitors()?;
    let exclusions = config.exclusions()?;

    let mut context = RunContext::new();

    for progenitor in &statics {
        debug!("Static progenitor {}", progenitor.nuclide);
        context.registry.register_progenitor(progenitor);
        context.resolve_levels(provider, &progenitor.nuclide)?;
    }

    let mut chains = Vec::with_capacity(recursive.len());
    for progenitor in recursive {
        info!("Discovering the decay chain of {}", progenitor.nuclide);
        context.registry.register_progenitor(&progenitor);
        context.resolve_levels(provider, &progenitor.nuclide)?;
        context.lineage.add_root(&progenitor.nuclide);

        let mut nuclides = vec![progenitor.nuclide.clone()];
        nuclides.extend_unique(discover(&mut context, provider, &progenitor.nuclide)?);
        info!("{} has {} nuclides in its chain", progenitor.nuclide, nuclides.len());

        chains.push(DecayChain {
            progenitor,
            nuclides,
        });
    }

    evaluate(&mut context.registry);
    context.registry.flatten_all();

    let mut subset = Vec::new();
    let candidates = chains
        .iter()
        .flat_map(|c| c.nuclides.iter())
        .chain(statics.iter().map(|s| &s.nuclide));
    for nuclide in candidates {
        subset.push_unique(nuclide.intrinsic());
    }

    for excluded in &exclusions {
        if !subset.contains(excluded) {
            warn!("Excluded {excluded} is not part of the library");
        }
    }
    subset.retain(|n| !exclusions.contains(n));

    let options = AssemblyOptions {
        rad_type: config.spectrum_rad_type()?,
        cutoffs: config.cutoffs,
        sort_by: config.sort_by,
        database: config.database.clone(),
    };
    let rows = assemble(&subset, &context.registry, provider, &options)?;
    info!("Library has {} rows from {} nuclides", rows.len(), subset.len());

    Ok(Library {
        rows,
        subset,
        chains,
        context,
    })
}
