// File: crates/chart-core/src/transform.rs
// Summary: Row transformation: RawRow -> CleanRecord through a declared RecordSpec.
// Notes:
// - Strict all-or-nothing filter on required fields; partial records are dropped, not patched.
// - Output keeps input row order. Charts re-sort downstream if they need to.

use tracing::debug;

use crate::coerce::coerce;
use crate::columns::{resolve, ColumnSpec, Resolution, ResolvedColumn};
use crate::source::RawTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
}

#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub column: ColumnSpec,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn numeric(key: &'static str, column: ColumnSpec) -> Self {
        Self { key, column, kind: FieldKind::Numeric, required: true }
    }

    pub fn text(key: &'static str, column: ColumnSpec) -> Self {
        Self { key, column, kind: FieldKind::Text, required: true }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Per-chart declaration of the fields a CleanRecord carries.
#[derive(Clone, Debug, Default)]
pub struct RecordSpec {
    fields: Vec<FieldSpec>,
}

impl RecordSpec {
    pub fn new() -> Self { Self::default() }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] { &self.fields }

    /// Human-readable list of the required fields, used in empty-state messages.
    pub fn required_summary(&self) -> String {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| {
                let kind = match f.kind {
                    FieldKind::Numeric => "numeric ",
                    FieldKind::Text => "",
                };
                let name = f.column.alias_list().first().map(String::as_str).unwrap_or(f.key);
                format!("{kind}{name}")
            })
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

/// One validated row. Every `Number` held here is finite.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanRecord {
    values: Vec<(&'static str, FieldValue)>,
}

impl CleanRecord {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn values(&self) -> &[(&'static str, FieldValue)] { &self.values }
}

/// What happened during one transformation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub columns: Vec<(&'static str, Resolution<ResolvedColumn>)>,
}

impl TransformReport {
    pub fn rows_dropped(&self) -> usize { self.rows_read - self.rows_kept }

    /// Keys of fields whose column could not be found at all.
    pub fn unresolved(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|(_, r)| !r.is_resolved())
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Transform every row of `table`, keeping only complete records.
pub fn transform_all(table: &RawTable, spec: &RecordSpec) -> Vec<CleanRecord> {
    transform_with_report(table, spec).0
}

pub fn transform_with_report(table: &RawTable, spec: &RecordSpec) -> (Vec<CleanRecord>, TransformReport) {
    let columns: Vec<(&'static str, Resolution<ResolvedColumn>)> = spec
        .fields()
        .iter()
        .map(|f| (f.key, f.column.resolve_header(table.headers())))
        .collect();

    let mut out = Vec::with_capacity(table.len());
    'rows: for row in table.rows() {
        let mut values = Vec::with_capacity(spec.fields().len());
        for (field, (_, column)) in spec.fields().iter().zip(&columns) {
            let cell = match column {
                Resolution::Resolved(c) => resolve(&row, c.candidates.as_slice()).resolved().map(|c| c.value),
                Resolution::Unresolved => None,
            };
            let value = match field.kind {
                FieldKind::Numeric => coerce(cell).map_or(FieldValue::Missing, FieldValue::Number),
                FieldKind::Text => match cell.map(str::trim) {
                    Some(s) if !s.is_empty() => FieldValue::Text(s.to_string()),
                    _ => FieldValue::Missing,
                },
            };
            if field.required && value == FieldValue::Missing {
                continue 'rows;
            }
            values.push((field.key, value));
        }
        out.push(CleanRecord { values });
    }

    let report = TransformReport { rows_read: table.len(), rows_kept: out.len(), columns };
    debug!(
        source = table.source_name(),
        read = report.rows_read,
        kept = report.rows_kept,
        dropped = report.rows_dropped(),
        unresolved = ?report.unresolved(),
        "rows transformed"
    );
    (out, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> RecordSpec {
        RecordSpec::new()
            .field(FieldSpec::text("tech", ColumnSpec::single("Screen_Tech")))
            .field(FieldSpec::numeric("mean", ColumnSpec::aliases(["Mean", "Avg"])))
            .field(FieldSpec::numeric("size", ColumnSpec::single("screensize")).optional())
    }

    #[test]
    fn keeps_complete_rows_in_input_order() {
        let t = RawTable::from_csv_str(
            "t.csv",
            "Screen_Tech,Mean,screensize\nOLED, 120 kWh,55\nLED,n/a,40\n  ,80,32\nPlasma,300,\n",
        )
        .unwrap();
        let (recs, report) = transform_with_report(&t, &spec());
        let techs: Vec<_> = recs.iter().filter_map(|r| r.text("tech")).collect();
        assert_eq!(techs, ["OLED", "Plasma"]);
        assert_eq!(recs[0].number("mean"), Some(120.0));
        assert_eq!(recs[1].get("size"), Some(&FieldValue::Missing));
        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_dropped(), 2);
    }

    #[test]
    fn alias_fallback_per_row() {
        let t = RawTable::from_csv_str("t.csv", "Screen_Tech,Mean,Avg\nLED,,42\n").unwrap();
        let recs = transform_all(&t, &spec());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].number("mean"), Some(42.0));
    }

    #[test]
    fn unresolved_required_column_drops_everything() {
        let t = RawTable::from_csv_str("t.csv", "Tech,Value\nLED,1\n").unwrap();
        let (recs, report) = transform_with_report(&t, &spec());
        assert!(recs.is_empty());
        assert_eq!(report.unresolved(), ["tech", "mean", "size"]);
    }

    #[test]
    fn required_summary_names_first_aliases() {
        assert_eq!(spec().required_summary(), "Screen_Tech or numeric Mean");
    }
}
