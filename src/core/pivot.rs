use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use crate::core::spec::{ChartSpec, EncodeMapping};
use crate::core::value::{DataRow, Value};
use crate::error::{ChartError, ChartResult};

/// One aligned series produced by [`pivot`], dense over the table's category
/// axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotSeries {
    pub group: Value,
    pub values: Vec<f64>,
}

/// Output of the pivot transform: a shared category axis in first-seen order
/// and one series per distinct group value in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub categories: Vec<Value>,
    pub series: Vec<PivotSeries>,
    /// Rows skipped for missing or non-numeric referenced fields. A
    /// data-quality signal, not a failure.
    pub skipped_rows: usize,
}

/// Metric value used when no row supplied a (group, category) combination.
/// Zero keeps stacked totals correct.
pub const MISSING_METRIC: f64 = 0.0;

impl PivotTable {
    /// Dimension list for the wide-row projection: the category field followed
    /// by one column per group, in first-seen group order.
    #[must_use]
    pub fn dimension_names(&self, category_field: &str) -> Vec<String> {
        let mut names = Vec::with_capacity(self.series.len() + 1);
        names.push(category_field.to_owned());
        names.extend(self.series.iter().map(|s| s.group.to_string()));
        names
    }

    /// First column name of the wide-row projection that collides with the
    /// category field or an earlier group, if any.
    ///
    /// Group columns are named by the group value's string form, so a group
    /// literally named like the category field, or two groups sharing a
    /// string form (`Text("5")` and `Number(5.0)`), would silently overwrite
    /// a column in [`PivotTable::to_rows`]. Callers reject such a chart
    /// instead of embedding it.
    #[must_use]
    pub fn duplicate_column(&self, category_field: &str) -> Option<String> {
        let mut seen = IndexSet::new();
        seen.insert(category_field.to_owned());
        for series in &self.series {
            let name = series.group.to_string();
            if !seen.insert(name.clone()) {
                return Some(name);
            }
        }
        None
    }

    /// Wide-row projection: one row per category, carrying the category value
    /// plus each group's metric. This is the shape the codec embeds for
    /// grouped charts.
    #[must_use]
    pub fn to_rows(&self, category_field: &str) -> Vec<DataRow> {
        self.categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let mut row = DataRow::with_capacity(self.series.len() + 1);
                row.insert(category_field.to_owned(), category.clone());
                for series in &self.series {
                    row.insert(series.group.to_string(), Value::number(series.values[index]));
                }
                row
            })
            .collect()
    }
}

/// Pivots the spec's flat rows into one series per distinct group value.
///
/// Requires `group_field` to be set and the encode mapping to carry both the
/// `x` (category) and `y` (metric) roles. Rows are scanned once in order;
/// category and group axes keep first-seen order so externally meaningful
/// orderings (months inserted chronologically, say) survive without the core
/// knowing the field's semantics. Duplicate (group, category) combinations
/// resolve last-write-wins; combinations no row supplied resolve to
/// [`MISSING_METRIC`].
pub fn pivot(spec: &ChartSpec) -> ChartResult<PivotTable> {
    let Some(group_field) = spec.group_field() else {
        return Err(ChartError::InvalidSpec(format!(
            "chart '{}' has no group field to pivot on",
            spec.id()
        )));
    };
    let category_field = require_role(spec, EncodeMapping::ROLE_X)?;
    let metric_field = require_role(spec, EncodeMapping::ROLE_Y)?;

    let mut categories: IndexSet<Value> = IndexSet::new();
    let mut cells: IndexMap<Value, IndexMap<Value, f64>> = IndexMap::new();
    let mut skipped_rows = 0_usize;

    for row in spec.rows() {
        let (Some(category), Some(group), Some(metric)) = (
            row.get(category_field),
            row.get(group_field),
            row.get(metric_field).and_then(Value::as_f64),
        ) else {
            skipped_rows += 1;
            continue;
        };
        categories.insert(category.clone());
        cells
            .entry(group.clone())
            .or_default()
            .insert(category.clone(), metric);
    }

    if skipped_rows > 0 {
        warn!(
            chart_id = spec.id(),
            skipped_rows,
            category_field,
            group_field,
            metric_field,
            "skipped rows with missing or non-numeric pivot fields"
        );
    }

    let series = cells
        .into_iter()
        .map(|(group, row_cells)| PivotSeries {
            group,
            values: categories
                .iter()
                .map(|category| row_cells.get(category).copied().unwrap_or(MISSING_METRIC))
                .collect(),
        })
        .collect();

    Ok(PivotTable {
        categories: categories.into_iter().collect(),
        series,
        skipped_rows,
    })
}

fn require_role<'a>(spec: &'a ChartSpec, role: &str) -> ChartResult<&'a str> {
    spec.encode().field_for(role).ok_or_else(|| {
        ChartError::InvalidSpec(format!(
            "chart '{}' pivots on '{}' but its encode mapping has no '{role}' role",
            spec.id(),
            spec.group_field().unwrap_or_default()
        ))
    })
}
