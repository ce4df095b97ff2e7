// File: crates/chart-core/src/source.rs
// Summary: CSV sources (local path or http URL) loaded into a RawTable of header-keyed rows.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Where a chart's CSV comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    /// Only fetchable with the `http` feature.
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` become URLs, anything else a filesystem path.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }

    /// File name used in viewer-facing messages ("No rows found in <name>").
    pub fn display_name(&self) -> String {
        match self {
            Self::Path(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            Self::Url(u) => u
                .rsplit('/')
                .find(|s| !s.is_empty())
                .unwrap_or(u.as_str())
                .to_string(),
        }
    }

    pub fn load(&self) -> ChartResult<RawTable> {
        let name = self.display_name();
        match self {
            Self::Path(path) => load_path(&name, path),
            Self::Url(url) => load_url(&name, url),
        }
    }
}

fn load_path(name: &str, path: &Path) -> ChartResult<RawTable> {
    let file = std::fs::File::open(path)
        .map_err(|e| ChartError::source_unavailable(name, format!("{}: {e}", path.display())))?;
    RawTable::from_reader(name, file)
}

#[cfg(feature = "http")]
fn load_url(name: &str, url: &str) -> ChartResult<RawTable> {
    let resp = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ChartError::source_unavailable(name, e))?;
    let body = resp.text().map_err(|e| ChartError::source_unavailable(name, e))?;
    RawTable::from_reader(name, body.as_bytes())
}

#[cfg(not(feature = "http"))]
fn load_url(name: &str, url: &str) -> ChartResult<RawTable> {
    Err(ChartError::source_unavailable(
        name,
        format!("{url}: fetching URLs requires the `http` feature"),
    ))
}

/// Parsed CSV: the header row plus every data record, in file order.
#[derive(Clone, Debug)]
pub struct RawTable {
    source_name: String,
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl RawTable {
    pub fn from_reader<R: Read>(source_name: impl Into<String>, reader: R) -> ChartResult<Self> {
        let source_name = source_name.into();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| ChartError::source_unavailable(&source_name, e))?
            .iter()
            .map(normalize_header)
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| ChartError::source_unavailable(&source_name, e))?;
            // A trailing blank line comes back as a single empty field.
            if rec.iter().all(str::is_empty) {
                continue;
            }
            records.push(rec);
        }
        debug!(source = %source_name, columns = headers.len(), rows = records.len(), "csv loaded");
        Ok(Self { source_name, headers, records })
    }

    pub fn from_csv_str(source_name: impl Into<String>, text: &str) -> ChartResult<Self> {
        Self::from_reader(source_name, text.as_bytes())
    }

    pub fn source_name(&self) -> &str { &self.source_name }
    pub fn headers(&self) -> &[String] { &self.headers }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> + '_ {
        self.records.iter().map(move |record| RawRow { headers: &self.headers, record })
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// One CSV line viewed through the header row.
#[derive(Clone, Copy, Debug)]
pub struct RawRow<'a> {
    headers: &'a [String],
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    /// Cell text for `column`; `None` when the column does not exist or the line is short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.entry(column).map(|(_, cell)| cell)
    }

    /// Like [`RawRow::get`] but also hands back the row's own header string.
    pub fn entry(&self, column: &str) -> Option<(&'a str, &'a str)> {
        let idx = self.headers.iter().position(|h| h == column)?;
        Some((self.headers[idx].as_str(), self.record.get(idx)?))
    }

    pub fn columns(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter().map(String::as_str)
    }

    /// `(column, cell)` pairs; short lines yield only the cells they have.
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.headers.iter().map(String::as_str).zip(self.record.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_file_name() {
        let s = DataSource::parse("./data/Ex5_TV_energy.csv");
        assert_eq!(s.display_name(), "Ex5_TV_energy.csv");
        let u = DataSource::parse("https://example.org/data/Ex5_ARE_Spot_Prices.csv");
        assert!(matches!(u, DataSource::Url(_)));
        assert_eq!(u.display_name(), "Ex5_ARE_Spot_Prices.csv");
    }

    #[test]
    fn header_only_csv_has_no_rows() {
        let t = RawTable::from_csv_str("h.csv", "Screen_Tech,Value\n").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.headers(), ["Screen_Tech", "Value"]);
    }

    #[test]
    fn rows_are_keyed_by_header() {
        let t = RawTable::from_csv_str("t.csv", "\u{feff}a,b\n1,x\n2\n").unwrap();
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), Some("x"));
        assert_eq!(rows[1].get("b"), None);
        assert_eq!(rows[1].get("missing"), None);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = DataSource::parse("/definitely/not/here.csv").load().unwrap_err();
        assert!(matches!(err, ChartError::SourceUnavailable { ref source_name, .. } if source_name == "here.csv"));
    }
}
