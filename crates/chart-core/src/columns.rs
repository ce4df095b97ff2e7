// File: crates/chart-core/src/columns.rs
// Summary: Two-stage column resolution: exact alias lookup, then case-insensitive pattern fallback.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::ChartResult;
use crate::source::RawRow;

/// Tagged outcome of a lookup; callers branch on it instead of probing for empty values.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool { matches!(self, Self::Resolved(_)) }

    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(v) => Some(v),
            Self::Unresolved => None,
        }
    }

    pub fn as_ref(&self) -> Resolution<&T> {
        match self {
            Self::Resolved(v) => Resolution::Resolved(v),
            Self::Unresolved => Resolution::Unresolved,
        }
    }
}

/// A non-empty cell found through an alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<'a> {
    pub column: &'a str,
    pub value: &'a str,
}

/// First alias that is present in `row` with a non-empty value.
pub fn resolve<'a, S: AsRef<str>>(row: &RawRow<'a>, aliases: &[S]) -> Resolution<Cell<'a>> {
    aliases
        .iter()
        .filter_map(|alias| row.entry(alias.as_ref()))
        .find(|(_, value)| !value.is_empty())
        .map_or(Resolution::Unresolved, |(column, value)| Resolution::Resolved(Cell { column, value }))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    /// Header text drifted; matched through a pattern.
    Pattern,
}

/// Header(s) a field will be read from, decided once per table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Candidate headers in alias order. Pattern matches produce exactly one.
    pub candidates: Vec<String>,
    pub via: MatchKind,
}

impl ResolvedColumn {
    pub fn primary(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or_default()
    }
}

/// Aliases plus optional header patterns for one logical field.
#[derive(Clone, Debug, Default)]
pub struct ColumnSpec {
    aliases: Vec<String>,
    patterns: Vec<Regex>,
}

impl ColumnSpec {
    pub fn aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { aliases: aliases.into_iter().map(Into::into).collect(), patterns: Vec::new() }
    }

    pub fn single(alias: impl Into<String>) -> Self {
        Self::aliases([alias])
    }

    /// Adds a fallback pattern, matched case-insensitively against header text.
    pub fn with_pattern(mut self, pattern: &str) -> ChartResult<Self> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        self.patterns.push(re);
        Ok(self)
    }

    pub fn alias_list(&self) -> &[String] { &self.aliases }

    /// Exact aliases present in `headers` first; if none, the first header matching a pattern.
    pub fn resolve_header(&self, headers: &[String]) -> Resolution<ResolvedColumn> {
        let exact: Vec<String> = self
            .aliases
            .iter()
            .filter(|a| headers.iter().any(|h| h == *a))
            .cloned()
            .collect();
        if !exact.is_empty() {
            return Resolution::Resolved(ResolvedColumn { candidates: exact, via: MatchKind::Exact });
        }

        for re in &self.patterns {
            if let Some(h) = headers.iter().find(|h| re.is_match(h)) {
                debug!(wanted = ?self.aliases, found = %h, "column header drift; using pattern match");
                return Resolution::Resolved(ResolvedColumn {
                    candidates: vec![h.clone()],
                    via: MatchKind::Pattern,
                });
            }
        }
        Resolution::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawTable;

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv_str("t.csv", csv).unwrap()
    }

    #[test]
    fn first_present_non_empty_alias_wins() {
        let t = table("model,Model,name\n,X55,ignored\n");
        let row = t.rows().next().unwrap();
        let got = resolve(&row, &["missing", "model", "Model", "name"]);
        assert_eq!(got, Resolution::Resolved(Cell { column: "Model", value: "X55" }));
    }

    #[test]
    fn unresolved_when_nothing_matches() {
        let t = table("a,b\n,\n");
        let row = t.rows().next().unwrap();
        assert_eq!(resolve(&row, &["a", "b", "c"]), Resolution::Unresolved);
    }

    #[test]
    fn exact_header_beats_pattern() {
        let spec = ColumnSpec::single("Mean(Labelled energy consumption (kWh/year))")
            .with_pattern("Labelled energy")
            .unwrap();
        let headers = vec!["Screen_Tech".to_string(), "Mean(Labelled energy consumption (kWh/year))".to_string()];
        let r = spec.resolve_header(&headers).resolved().unwrap();
        assert_eq!(r.via, MatchKind::Exact);
    }

    #[test]
    fn pattern_fallback_tolerates_drift() {
        let spec = ColumnSpec::single("Mean(Labelled energy consumption (kWh/year))")
            .with_pattern(r"^Mean\(Labelled energy consumption \(kWh/year\)\)")
            .unwrap()
            .with_pattern("Labelled energy")
            .unwrap();
        let headers = vec!["Screen_Tech".to_string(), "mean labelled ENERGY kwh".to_string()];
        let r = spec.resolve_header(&headers).resolved().unwrap();
        assert_eq!(r.via, MatchKind::Pattern);
        assert_eq!(r.primary(), "mean labelled ENERGY kwh");
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(ColumnSpec::single("x").with_pattern("(").is_err());
    }
}
