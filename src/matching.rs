use std::fmt;
use std::str::FromStr;

/// How free text gates content rows. The mode decides membership only;
/// survivors keep the order the index returned them in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Display name starts with the query. The workflow's historic behavior.
    #[default]
    Prefix,
    /// Display name contains the query anywhere.
    Substring,
    /// Typo-tolerant subsequence match.
    Fuzzy,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Prefix => "prefix",
            MatchMode::Substring => "substring",
            MatchMode::Fuzzy => "fuzzy",
        }
    }

    /// Indices into `names` that survive `query`, ascending. An empty query
    /// keeps everything.
    pub fn filter_indices(self, query: &str, names: &[&str]) -> Vec<usize> {
        if query.is_empty() {
            return (0..names.len()).collect();
        }
        match self {
            MatchMode::Prefix => {
                let query = query.to_lowercase();
                names
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| name.to_lowercase().starts_with(&query))
                    .map(|(idx, _)| idx)
                    .collect()
            }
            MatchMode::Substring => substring_indices(query, names),
            MatchMode::Fuzzy => fuzzy_indices(query, names),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(MatchMode::Prefix),
            "substring" => Ok(MatchMode::Substring),
            "fuzzy" => Ok(MatchMode::Fuzzy),
            other => Err(format!(
                "unknown match mode '{other}' (expected prefix, substring or fuzzy)"
            )),
        }
    }
}

fn substring_indices(query: &str, names: &[&str]) -> Vec<usize> {
    let query = query.to_lowercase();
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Short queries would otherwise match nearly everything.
fn typo_budget(query: &str) -> u16 {
    (query.len() as u16 / 4).clamp(2, 6)
}

fn fuzzy_indices(query: &str, names: &[&str]) -> Vec<usize> {
    // The typo matcher needs at least two needle bytes; a budget above the
    // query length underflows inside it. Gate shorter queries on plain
    // membership instead.
    if query.len() < 2 {
        return substring_indices(query, names);
    }

    let options = neo_frizbee::Config {
        max_typos: Some(typo_budget(query)),
        sort: false,
        ..Default::default()
    };

    let mut indices: Vec<usize> = neo_frizbee::match_list_parallel(query, names, &options, 1)
        .into_iter()
        .map(|m| m.index as usize)
        .collect();
    indices.sort_unstable();
    indices
}
