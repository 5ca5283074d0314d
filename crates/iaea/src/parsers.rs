//! Set of useful parser combinators

// internal modules
use crate::common::{IsomerState, Nuclide};

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{alpha1, one_of};
use nom::combinator::{all_consuming, opt};
use nom::error::{Error, ErrorKind};
use nom::{self, Err, IResult};

/// Parse string into a usable Nuclide as a common type
///
/// Can be:
///     - Element only Co, C
///     - Isotope Co60, C12, Co-60
///     - Metastable Co60m1 Co60m2 Tc-99m
///     - Fispact Co60m Co60n
///     - IAEA query alias 99tc
///
/// Full is <element><separator><isotope><metastable>, or <isotope><element>
/// for the IAEA alias.
///
/// The whole input must be consumed, so trailing garbage is an error rather
/// than silently ignored.
pub(crate) fn nuclide_from_str(i: &str) -> IResult<&str, Nuclide> {
    all_consuming(alt((symbol_first, mass_first)))(i)
}

/// Standard notation, e.g. Tc-99m
fn symbol_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, element) = element(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, isotope) = opt(isotope)(i)?;

    // Only look for a metastable tag if it follows an isotope number
    let (i, state) = match isotope {
        Some(_) => metastable(i)?,
        None => (i, IsomerState::Ground),
    };

    Ok((i, Nuclide::new(element, isotope.unwrap_or(0), state)))
}

/// IAEA API notation, e.g. 99tc, never carries an isomer
fn mass_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, isotope) = isotope(i)?;
    let (i, element) = element(i)?;
    Ok((i, Nuclide::new(element, isotope, IsomerState::Ground)))
}

/// Get the element symbol
fn element(i: &str) -> IResult<&str, &str> {
    let (rest, element) = alpha1(i)?;

    if element.len() > 2 {
        Err(Err::Error(Error::new(i, ErrorKind::Fail)))
    } else {
        Ok((rest, element))
    }
}

/// Get an unsigned integer value
fn isotope(i: &str) -> IResult<&str, u16> {
    nom::character::complete::u16(i)
}

/// Get the stability from a range of possible formats and conventions
fn metastable(i: &str) -> IResult<&str, IsomerState> {
    let (i, state) = opt(alt((numbered_isomer, symbol_isomer)))(i)?;
    Ok((i, state.unwrap_or(IsomerState::Ground)))
}

/// List of possible separators people may use
fn separator(i: &str) -> IResult<&str, char> {
    one_of("_-")(i)
}

/// Get the isomer from the usual ENSDF formats m1, m2, etc...
fn numbered_isomer(i: &str) -> IResult<&str, IsomerState> {
    let (i, _) = one_of("mM")(i)?;
    let (i, number) = nom::character::complete::u8(i)?;

    if number == 0 {
        Ok((i, IsomerState::Ground))
    } else {
        Ok((i, IsomerState::Excited(number)))
    }
}

/// Get the isomer type from known fispact/common use symbols
fn symbol_isomer(i: &str) -> IResult<&str, IsomerState> {
    let (rest, symbol) = one_of("gGmMnNoO*")(i)?;
    let state = match symbol.to_ascii_lowercase() {
        'g' => IsomerState::Ground,
        'n' => IsomerState::Excited(2),
        'o' => IsomerState::Excited(3),
        // 'm' or '*'
        _ => IsomerState::Excited(1),
    };
    Ok((rest, state))
}

/// Parse a level energy that may carry an unknown offset marker
///
/// ENSDF levels built on a level of unknown energy are written relative to
/// it, e.g. `73.92+X`. The offset is dropped, leaving the known part.
///
/// Returns `None` for anything that is not a finite number once the marker is
/// gone.
pub(crate) fn level_energy(s: &str) -> Option<f64> {
    let s = s.trim();
    let known = match s.split_once('+') {
        Some((value, marker)) if !marker.is_empty() && marker.chars().all(char::is_alphabetic) => {
            value
        }
        _ => s,
    };
    known
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|energy| energy.is_finite())
}
