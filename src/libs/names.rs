//! Leaf name normalization.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref POSITION_RE: Regex = Regex::new(r"_\(\d+-\d+\)").unwrap();
    static ref NUMBERED_RE: Regex = Regex::new(r"_\d$").unwrap();
    static ref BRACKETED_POS_RE: Regex = Regex::new(r"/(\d+)-\d+").unwrap();
    static ref RSGA_POS_RE: Regex = Regex::new(r"(\d+)-\d+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NameError {
    #[error("No domain coordinates in name: {0}")]
    MissingCoordinates(String),
}

/// Remove every domain position marker `_(<start>-<end>)`.
///
/// ```
/// use domtree::libs::names::trim_name;
///
/// assert_eq!(
///     trim_name("Nitzschia_punctata,_Strain_CCMP561|CAMPEP_0199315576_(5-177)_1"),
///     "Nitzschia_punctata,_Strain_CCMP561|CAMPEP_0199315576_1"
/// );
/// ```
pub fn trim_name(name: &str) -> String {
    POSITION_RE.replace_all(name, "").into_owned()
}

/// Naming variants of HMMER domain hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HmmerStyle {
    /// `query/12-80 [subseq from] ...`
    #[default]
    Bracketed,
    /// `query12-80 _subseq ...`, brackets filtered out upstream
    Rsga,
}

impl HmmerStyle {
    fn strip_tail<'a>(&self, name: &'a str) -> &'a str {
        let marker = match self {
            HmmerStyle::Bracketed => " [subseq",
            HmmerStyle::Rsga => " _subseq",
        };
        name.split(marker).next().unwrap_or(name)
    }

    fn query<'a>(&self, stripped: &'a str) -> &'a str {
        match self {
            HmmerStyle::Bracketed => stripped.split('/').next().unwrap_or(stripped),
            HmmerStyle::Rsga => RSGA_POS_RE
                .find(stripped)
                .map(|m| &stripped[..m.start()])
                .unwrap_or(stripped),
        }
    }

    fn first_position(&self, name: &str) -> Option<u64> {
        let re: &Regex = match self {
            HmmerStyle::Bracketed => &BRACKETED_POS_RE,
            HmmerStyle::Rsga => &RSGA_POS_RE,
        };
        re.captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Map HMMER hit IDs to numbered leaf names.
///
/// The subsequence tail is dropped. Hits of one query are numbered
/// `query_1..query_k` by their first coordinate; equal coordinates share a
/// number. A lone hit becomes `query_1`. Names already ending in
/// `_<digit>` keep their stripped form.
pub fn hmmer_name_mapping<S: AsRef<str>>(
    names: &[S],
    style: HmmerStyle,
) -> Result<IndexMap<String, String>, NameError> {
    let mut mapping: IndexMap<String, String> = names
        .iter()
        .map(|n| (n.as_ref().to_string(), style.strip_tail(n.as_ref()).to_string()))
        .collect();

    // query => hits, in input order
    let mut queries: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, stripped) in &mapping {
        if NUMBERED_RE.is_match(stripped) {
            continue;
        }
        queries
            .entry(style.query(stripped).to_string())
            .or_default()
            .push(name.clone());
    }

    for (query, hits) in &queries {
        if hits.len() == 1 {
            mapping.insert(hits[0].clone(), format!("{}_1", query));
            continue;
        }

        let positions = hits
            .iter()
            .map(|hit| {
                style
                    .first_position(hit)
                    .ok_or_else(|| NameError::MissingCoordinates(hit.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut sorted = positions.clone();
        sorted.sort_unstable();

        for (hit, pos) in hits.iter().zip(&positions) {
            let rank = sorted.partition_point(|p| p < pos) + 1;
            mapping.insert(hit.clone(), format!("{}_{}", query, rank));
        }
    }

    Ok(mapping)
}
