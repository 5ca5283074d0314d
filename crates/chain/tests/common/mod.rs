//! Synthetic decay data shared by the integration tests
#![allow(dead_code)]

use rnlib_iaea::{GammaTransition, Level, Nuclide, RadType, Record, StaticProvider};
use std::str::FromStr;

pub fn nuclide(name: &str) -> Nuclide {
    Nuclide::from_str(name).unwrap()
}

fn proton_number(symbol: &str) -> u16 {
    match symbol {
        "Tl" => 81,
        "Pb" => 82,
        "Bi" => 83,
        "Po" => 84,
        "Mo" => 42,
        "Tc" => 43,
        "Ru" => 44,
        _ => panic!("no proton number for {symbol}"),
    }
}

fn counts(name: &str) -> (Option<String>, Option<u16>, Option<u16>) {
    let nuclide = nuclide(name);
    let z = proton_number(&nuclide.symbol);
    (Some(nuclide.symbol), Some(z), Some(nuclide.isotope - z))
}

/// Decay from a parent level that feeds a daughter level
pub fn decay(parent: &str, p_energy: f64, daughter: &str, d_level: f64) -> Record {
    let (p_symbol, p_z, p_n) = counts(parent);
    let (d_symbol, d_z, d_n) = counts(daughter);
    Record {
        p_symbol,
        p_z,
        p_n,
        p_energy: Some(p_energy),
        d_symbol,
        d_z,
        d_n,
        daughter_level_energy: Some(d_level),
        half_life_sec: Some(1.0),
        ..Default::default()
    }
}

/// Radiation from a parent level without a known daughter level
pub fn emission(
    parent: &str,
    p_energy: f64,
    daughter: &str,
    energy: f64,
    intensity: f64,
    mode: &str,
) -> Record {
    Record {
        energy: Some(energy),
        intensity: Some(intensity),
        decay_mode: Some(mode.to_string()),
        daughter_level_energy: None,
        ..decay(parent, p_energy, daughter, 0.0)
    }
}

pub fn transition(start: f64, unc: Option<f64>, end: f64) -> GammaTransition {
    GammaTransition {
        start_level_energy: Some(start),
        unc_sle: unc,
        end_level_energy: Some(end),
        ..Default::default()
    }
}

pub fn level(energy: f64, unc: Option<f64>, modes: &[&str]) -> Level {
    let mode = |i: usize| modes.get(i).map(|m| m.to_string());
    Level {
        energy: Some(energy),
        unc_e: unc,
        decay_1: mode(0),
        decay_2: mode(1),
        decay_3: mode(2),
        ..Default::default()
    }
}

fn with_half_life(records: Vec<Record>, half_life_sec: f64) -> Vec<Record> {
    records
        .into_iter()
        .map(|r| Record {
            half_life_sec: Some(half_life_sec),
            ..r
        })
        .collect()
}

/// Mo-99 -> Tc-99 (with the 142.68 keV isomer) -> Ru-99
pub fn mo99_chart() -> StaticProvider {
    let mut chart = StaticProvider::default();
    let (mo99, tc99) = (nuclide("Mo-99"), nuclide("Tc-99"));

    chart.insert_decay(
        &mo99,
        RadType::BetaMinus,
        vec![
            decay("Mo-99", 0.0, "Tc-99", 142.6836),
            decay("Mo-99", 0.0, "Tc-99", 0.0),
            decay("Mo-99", 97.785, "Tc-99", 1004.6),
        ],
    );
    chart.insert_decay(
        &mo99,
        RadType::Gamma,
        with_half_life(
            vec![
                emission("Mo-99", 0.0, "Tc-99", 739.5, 12.12, "B-"),
                emission("Mo-99", 0.0, "Tc-99", 181.068, 6.05, "B-"),
                emission("Mo-99", 0.0, "Tc-99", 777.921, 4.28, "B-"),
            ],
            237513.6,
        ),
    );

    chart.insert_gammas(
        &tc99,
        vec![
            transition(142.6836, Some(0.0011), 140.511),
            transition(142.6836, Some(0.0011), 0.0),
            transition(140.511, Some(0.001), 0.0),
        ],
    );
    chart.insert_levels(
        &tc99,
        vec![
            level(0.0, None, &["B-"]),
            level(140.511, Some(0.001), &[]),
            level(142.6836, Some(0.0011), &["IT", "B-"]),
        ],
    );
    chart.insert_decay(
        &tc99,
        RadType::BetaMinus,
        vec![decay("Tc-99", 0.0, "Ru-99", 0.0)],
    );

    let mut gammas = with_half_life(
        vec![
            emission("Tc-99", 142.6836, "Tc-99", 140.511, 89.0, "IT"),
            emission("Tc-99", 142.6836, "Tc-99", 142.63, 0.023, "IT"),
            emission("Tc-99", 181.0, "Tc-99", 181.0, 1.0, "IT"),
        ],
        21624.12,
    );
    gammas.extend(with_half_life(
        vec![emission("Tc-99", 0.0, "Ru-99", 89.5, 6.5e-4, "B-")],
        6.66e12,
    ));
    chart.insert_decay(&tc99, RadType::Gamma, gammas);

    chart
}

fn to_ground(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .map(|r| Record {
            daughter_level_energy: Some(0.0),
            ..r
        })
        .collect()
}

/// Bi-212 branching to Tl-208 and Po-212, both ending at Pb-208
///
/// Every decay goes from ground state to ground state.
pub fn bi212_chart() -> StaticProvider {
    let mut chart = StaticProvider::default();

    chart.insert_decay(
        &nuclide("Bi-212"),
        RadType::Alpha,
        to_ground(vec![
            emission("Bi-212", 0.0, "Tl-208", 6050.78, 25.13, "A"),
            emission("Bi-212", 0.0, "Tl-208", 6089.88, 9.75, "A"),
        ]),
    );
    chart.insert_decay(
        &nuclide("Bi-212"),
        RadType::BetaMinus,
        to_ground(vec![emission("Bi-212", 0.0, "Po-212", 834.0, 55.46, "B-")]),
    );
    chart.insert_decay(
        &nuclide("Tl-208"),
        RadType::BetaMinus,
        to_ground(vec![emission("Tl-208", 0.0, "Pb-208", 560.0, 49.1, "B-")]),
    );
    chart.insert_decay(
        &nuclide("Po-212"),
        RadType::Alpha,
        to_ground(vec![emission("Po-212", 0.0, "Pb-208", 8784.86, 100.0, "A")]),
    );

    chart
}

/// The Bi-212 chart with its alpha lookup answered by a malformed request code
pub fn bi212_failing_alpha() -> StaticProvider {
    let mut chart = bi212_chart();
    chart.insert_failure(&nuclide("Bi-212"), RadType::Alpha, 3);
    chart
}
