//! Integration tests for library generation

mod common;

use common::{bi212_chart, bi212_failing_alpha, mo99_chart, nuclide};
use rnlib_chain::{
    evaluate, generate, Cutoffs, Error, LibraryConfig, SortBy, ISOMERIC_TRANSITION,
};
use rnlib_iaea::{DataKind, LiveChart, RadType, StaticProvider, UnavailableRegistry};
use rstest::{fixture, rstest};
use std::fs;

#[fixture]
fn mo99_config() -> LibraryConfig {
    LibraryConfig {
        recursive: vec!["Mo-99".to_string()],
        ..Default::default()
    }
}

/// (radionuclide, radiation number, key radiation, energy) of every row
fn summary(config: &LibraryConfig, chart: &mut StaticProvider) -> Vec<Summary> {
    generate(config, chart)
        .unwrap()
        .rows
        .iter()
        .map(|r| {
            (
                r.radionuclide.name(),
                r.radiation_number,
                r.key_radiation,
                r.record.energy.unwrap(),
            )
        })
        .collect()
}

type Summary = (String, usize, bool, f64);

fn row(name: &str, number: usize, key: bool, energy: f64) -> Summary {
    (name.to_string(), number, key, energy)
}

#[rstest]
fn isomers_split_and_renumbered(mo99_config: LibraryConfig) {
    let rows = summary(&mo99_config, &mut mo99_chart());
    assert_eq!(
        rows,
        vec![
            row("Mo-99", 1, true, 739.5),
            row("Mo-99", 2, false, 181.068),
            row("Mo-99", 3, false, 777.921),
            row("Tc-99m", 1, true, 140.511),
            row("Tc-99m", 2, false, 142.63),
            row("Tc-99", 1, true, 89.5),
        ]
    );
}

#[rstest]
fn feasibility_of_the_daughter(mo99_config: LibraryConfig) {
    let library = generate(&mo99_config, &mut mo99_chart()).unwrap();
    let entry = library.context.registry.get(&nuclide("Tc-99")).unwrap();

    let it = &entry.decay_modes[ISOMERIC_TRANSITION];
    assert!(it.is_feasible && it.is_isomer);
    assert_eq!(it.feasible_energies, vec![142.6836]);

    let beta = &entry.decay_modes["B-"];
    assert!(beta.is_feasible && !beta.is_isomer);
    assert_eq!(beta.feasible_energies, vec![142.6836, 0.0]);

    assert_eq!(entry.flattened_levels, vec![142.6836, 140.511, 0.0]);
    assert_eq!(entry.isomer_energies, vec![142.6836]);
}

#[rstest]
fn evaluation_is_idempotent(mo99_config: LibraryConfig) {
    let mut library = generate(&mo99_config, &mut mo99_chart()).unwrap();
    let before = library.context.registry.clone();
    evaluate(&mut library.context.registry);

    for (nuclide, entry) in before.iter() {
        let after = library.context.registry.get(nuclide).unwrap();
        assert_eq!(entry.decay_modes, after.decay_modes);
        assert_eq!(entry.flattened_levels, after.flattened_levels);
        assert_eq!(entry.isomer_energies, after.isomer_energies);
    }
}

#[rstest]
#[case(Cutoffs { energy: [100.0, 800.0], ..Default::default() }, vec![739.5, 181.068, 777.921, 140.511, 142.63])]
#[case(Cutoffs { intensity: [1.0, 100.0], ..Default::default() }, vec![739.5, 181.068, 777.921, 140.511])]
#[case(Cutoffs { half_life_sec: [0.0, 1e6], ..Default::default() }, vec![739.5, 181.068, 777.921, 140.511, 142.63])]
#[case(Cutoffs { energy: [5000.0, 6000.0], ..Default::default() }, vec![])]
fn cutoffs_are_applied(
    mut mo99_config: LibraryConfig,
    #[case] cutoffs: Cutoffs,
    #[case] expected: Vec<f64>,
) {
    mo99_config.cutoffs = cutoffs;
    let energies = summary(&mo99_config, &mut mo99_chart())
        .into_iter()
        .map(|r| r.3)
        .collect::<Vec<f64>>();
    assert_eq!(energies, expected);
}

#[rstest]
#[case(SortBy::Energy, vec![89.5, 140.511, 142.63, 181.068, 739.5, 777.921])]
#[case(SortBy::Intensity, vec![89.5, 142.63, 777.921, 181.068, 739.5, 140.511])]
#[case(SortBy::HalfLife, vec![140.511, 142.63, 739.5, 181.068, 777.921, 89.5])]
#[case(SortBy::Radionuclide, vec![739.5, 181.068, 777.921, 140.511, 142.63, 89.5])]
fn sort_modes(mut mo99_config: LibraryConfig, #[case] sort_by: SortBy, #[case] expected: Vec<f64>) {
    mo99_config.sort_by = sort_by;
    let energies = summary(&mo99_config, &mut mo99_chart())
        .into_iter()
        .map(|r| r.3)
        .collect::<Vec<f64>>();
    assert_eq!(energies, expected);
}

#[rstest]
#[case("Tc-99m;142.6836", vec![row("Tc-99m", 1, true, 140.511), row("Tc-99m", 2, false, 142.63), row("Tc-99", 1, true, 89.5)])]
#[case("Tc-99", vec![row("Tc-99", 1, true, 89.5)])]
fn static_progenitors(#[case] progenitor: &str, #[case] expected: Vec<Summary>) {
    let config = LibraryConfig {
        statics: vec![progenitor.to_string()],
        ..Default::default()
    };
    assert_eq!(summary(&config, &mut mo99_chart()), expected);
}

#[rstest]
fn exclusions_remove_isomers_too(mut mo99_config: LibraryConfig) {
    mo99_config.exclusion = vec!["Tc-99m".to_string()];
    let library = generate(&mo99_config, &mut mo99_chart()).unwrap();

    assert_eq!(library.subset, vec![nuclide("Mo-99"), nuclide("Ru-99")]);
    assert!(library.rows.iter().all(|r| r.radionuclide == nuclide("Mo-99")));
}

#[test]
fn chains_are_free_of_duplicates() {
    let config = LibraryConfig {
        recursive: vec!["Bi-212".to_string()],
        statics: vec!["Tl-208".to_string()],
        spectrum_radiation: "alpha".to_string(),
        ..Default::default()
    };
    let library = generate(&config, &mut bi212_chart()).unwrap();

    let expected = ["Bi-212", "Tl-208", "Po-212", "Pb-208"].map(nuclide).to_vec();
    assert_eq!(library.chains[0].nuclides, expected);
    assert_eq!(library.subset, expected);

    let alphas = library.rows.iter().map(|r| r.radionuclide.name()).collect::<Vec<_>>();
    assert_eq!(alphas, vec!["Bi-212", "Bi-212", "Po-212"]);

    let lineages = library.lineages();
    assert_eq!(lineages.len(), 1);
    assert_eq!(lineages[0].1.flatten().len(), 5);
}

#[test]
fn request_errors_do_not_stop_the_dataset() {
    let config = LibraryConfig {
        recursive: vec!["Bi-212".to_string()],
        spectrum_radiation: "alpha".to_string(),
        ..Default::default()
    };
    let library = generate(&config, &mut bi212_failing_alpha()).unwrap();

    let expected = ["Bi-212", "Po-212", "Pb-208"].map(nuclide).to_vec();
    assert_eq!(library.subset, expected);

    let alphas = library.rows.iter().map(|r| r.radionuclide.name()).collect::<Vec<_>>();
    assert_eq!(alphas, vec!["Po-212"]);
}

#[test]
fn configuration_errors_request_nothing() {
    let mut chart = mo99_chart();

    let config = LibraryConfig::default();
    assert!(matches!(generate(&config, &mut chart), Err(Error::Configuration(_))));

    let config = LibraryConfig {
        recursive: vec!["Mo-99".to_string()],
        spectrum_radiation: "x".to_string(),
        ..Default::default()
    };
    assert!(matches!(generate(&config, &mut chart), Err(Error::Configuration(_))));
    assert_eq!(chart.requests(), 0);
}

#[test]
fn yaml_dataset() {
    let yaml = "
recursive: [Mo-99]
static: ['Tc-99m;142.6836', '']
cutoffs: { energy: [100, 800] }
sort_by: energy
label: summed
";
    let config: LibraryConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.statics.len(), 2);
    assert_eq!(config.cutoffs.energy, [100.0, 800.0]);
    assert_eq!(config.cutoffs.intensity, [0.0, f64::INFINITY]);
    assert_eq!(config.spectrum_rad_type().unwrap(), RadType::Gamma);
    assert_eq!(config.static_progenitors().unwrap().len(), 1);

    assert!(serde_yaml::from_str::<LibraryConfig>("recursive: [Mo-99]\ncolour: red\n").is_err());
}

#[test]
fn corrupt_cache_aborts_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);
    let path = chart.cache_path(&nuclide("Mo-99"), DataKind::DecayRadiation, Some(RadType::Alpha));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "energy,intensity\n1,2\n3,4,5\n").unwrap();

    let config = LibraryConfig {
        recursive: vec!["Mo-99".to_string()],
        ..Default::default()
    };
    let mut chart = chart;
    let error = generate(&config, &mut chart).unwrap_err();
    assert!(matches!(error, Error::Provider(_)));
    assert!(error.is_fatal());
}

#[test]
fn nothing_cached_offline_is_an_empty_library() {
    let dir = tempfile::tempdir().unwrap();
    let mut chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);

    let config = LibraryConfig {
        recursive: vec!["Mo-99".to_string()],
        ..Default::default()
    };
    let library = generate(&config, &mut chart).unwrap();
    assert!(library.rows.is_empty());
    assert_eq!(library.subset, vec![nuclide("Mo-99")]);
}
