// external crates
use csv::Reader;
use log::{debug, trace};
use serde::de::DeserializeOwned;

// rnlib modules
use rnlib_utils::f;

// internal modules
use crate::common::{DataKind, Nuclide, RadType};
use crate::error::Result;

/// Base of the URL used to query the IAEA API
pub const IAEA_API: &str = "https://nds.iaea.org/relnsd/v1/data?";

/// Body of an API response
///
/// The API answers a bad or empty request with a single digit rather than an
/// HTTP error status, so every response has to be inspected.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// CSV table, with duplicate headings already fixed
    Csv(String),
    /// One of the numbered API error codes
    Code(u8),
}

/// Meaning of the numbered IAEA API error codes
///
/// See the error section of the
/// [guide](https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html).
///
/// ```rust
/// # use rnlib_iaea::error_message;
/// assert_eq!(error_message(0), "valid request, but no dataset is available");
/// assert_eq!(error_message(42), "unknown error");
/// ```
pub fn error_message(code: u8) -> &'static str {
    match code {
        0 => "valid request, but no dataset is available",
        1 => "fields unspecified",
        2 => "nuclides required for use with fields, but unspecified",
        3 => "fields misspelled",
        4 => "parents or products unspecified for fission yields",
        5 => "rad_types invalid",
        _ => "unknown error",
    }
}

/// Full query URL for a table
///
/// The radiation type is only used for `decay_rads` requests.
///
/// ```rust
/// # use rnlib_iaea::{query_url, DataKind, Nuclide, RadType};
/// # use std::str::FromStr;
/// let nuclide = Nuclide::from_str("Ac-225").unwrap();
/// assert_eq!(
///     query_url(&nuclide, DataKind::DecayRadiation, Some(RadType::Alpha)).unwrap(),
///     "https://nds.iaea.org/relnsd/v1/data?fields=decay_rads&nuclides=225ac&rad_types=a"
/// );
/// assert_eq!(
///     query_url(&nuclide, DataKind::Levels, None).unwrap(),
///     "https://nds.iaea.org/relnsd/v1/data?fields=levels&nuclides=225ac"
/// );
/// ```
pub fn query_url(nuclide: &Nuclide, kind: DataKind, rad_type: Option<RadType>) -> Result<String> {
    let mut url = f!(
        "{IAEA_API}fields={}&nuclides={}",
        kind.field(),
        nuclide.query_name()?
    );

    if let (DataKind::DecayRadiation, Some(rad_type)) = (kind, rad_type) {
        url += &f!("&rad_types={}", rad_type.query_symbol());
    }

    Ok(url)
}

/// Raw response directly from IAEA API
///
/// This will return either the CSV text received from the IAEA or the error
/// code the API answered with.
///
/// ```rust, no_run
/// # use rnlib_iaea::{fetch_raw, ApiResponse, DataKind, Nuclide, RadType};
/// # use std::str::FromStr;
/// let nuclide = Nuclide::from_str("co60").unwrap();
/// match fetch_raw(&nuclide, DataKind::DecayRadiation, Some(RadType::Gamma)).unwrap() {
///     ApiResponse::Csv(text) => println!("{text}"),
///     ApiResponse::Code(code) => println!("no data, code {code}"),
/// }
/// ```
pub fn fetch_raw(nuclide: &Nuclide, kind: DataKind, rad_type: Option<RadType>) -> Result<ApiResponse> {
    let url = query_url(nuclide, kind, rad_type)?;
    trace!("GET {url}");

    // the API refuses requests without a user agent
    let response = minreq::get(&url)
        .with_header("User-Agent", "rnlib")
        .send()?;

    Ok(interpret(response.as_str()?))
}

/// Sort a response body into a table or an error code
pub(crate) fn interpret(body: &str) -> ApiResponse {
    let trimmed = body.trim();
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => {
            let code = c.to_digit(10).unwrap_or(6) as u8;
            debug!("API responded with code {code}: {}", error_message(code));
            ApiResponse::Code(code)
        }
        _ => ApiResponse::Csv(fix_headings(body)),
    }
}

/// Deserialise CSV text into any of the table row types
///
/// Works for [Record](crate::Record), [GammaTransition](crate::GammaTransition)
/// and [Level](crate::Level) rows alike. Fields are trimmed and quoting is
/// ignored, matching what the API returns.
pub fn deserialise<T: DeserializeOwned>(csv_text: &str) -> Result<Vec<T>> {
    let fixed = fix_headings(csv_text);
    let mut rows = Vec::new();
    for row in csv_reader(&fixed).deserialize::<T>() {
        rows.push(row?);
    }
    Ok(rows)
}

// ! Private functions

fn csv_reader(csv_text: &str) -> Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
}

/// Rename the first of any duplicated `unc_me` headings
///
/// This is dumb, but duplicate fields are no good and both 'max_energy'
/// and 'mean_energy' have 'unc_me' for their uncertainties. Only affects
/// the beta radiation data.
fn fix_headings(csv_text: &str) -> String {
    let (header, body) = match csv_text.split_once('\n') {
        Some((header, body)) => (header, Some(body)),
        None => (csv_text, None),
    };

    let duplicated = header
        .split(',')
        .filter(|name| name.trim() == "unc_me")
        .count()
        > 1;

    let header = if duplicated {
        header.replacen("unc_me", "unc_mean", 1)
    } else {
        header.to_string()
    };

    match body {
        Some(body) => f!("{header}\n{body}"),
        None => header,
    }
}
