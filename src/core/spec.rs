use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::value::DataRow;
use crate::error::{ChartError, ChartResult};

/// Chart-type identifier.
///
/// Built-in identifiers are handled uniformly by any conforming surface;
/// custom identifiers are presets registered on the surface side and the host
/// carries them as opaque strings, never inspecting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Custom(String),
}

impl ChartType {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "line" => Self::Line,
            "bar" => Self::Bar,
            "pie" => Self::Pie,
            "scatter" => Self::Scatter,
            other => Self::Custom(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Custom(name) => name,
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Role-to-field assignment deciding which data field feeds which visual
/// axis/role (for example `x`, `y`, `itemName`, `value`).
///
/// Roles are chart-type-dependent and are not validated against the chart
/// type here; invalid combinations are the rendering surface's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodeMapping(IndexMap<String, String>);

impl EncodeMapping {
    pub const ROLE_X: &str = "x";
    pub const ROLE_Y: &str = "y";
    pub const ROLE_ITEM_NAME: &str = "itemName";
    pub const ROLE_VALUE: &str = "value";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The common cartesian shape: `{x: x_field, y: y_field}`.
    #[must_use]
    pub fn xy(x_field: &str, y_field: &str) -> Self {
        Self::new()
            .with_role(Self::ROLE_X, x_field)
            .with_role(Self::ROLE_Y, y_field)
    }

    /// The pie/gauge shape: `{itemName: name_field, value: value_field}`.
    #[must_use]
    pub fn item_value(name_field: &str, value_field: &str) -> Self {
        Self::new()
            .with_role(Self::ROLE_ITEM_NAME, name_field)
            .with_role(Self::ROLE_VALUE, value_field)
    }

    #[must_use]
    pub fn with_role(mut self, role: &str, field: &str) -> Self {
        self.0.insert(role.to_owned(), field.to_owned());
        self
    }

    #[must_use]
    pub fn field_for(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(role, field)| (role.as_str(), field.as_str()))
    }
}

/// Immutable description of one chart: identity, rows, field mapping, and
/// optional grouping, dimensions, and style overrides.
///
/// A spec is a value, not a handle: updating an on-surface chart means
/// producing a new spec with the same id and re-sending it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    id: String,
    title: String,
    chart_type: ChartType,
    rows: Vec<DataRow>,
    dimensions: Option<Vec<String>>,
    encode: EncodeMapping,
    group_field: Option<String>,
    options: Option<serde_json::Value>,
}

impl ChartSpec {
    /// Starts building a spec. `id` must be non-empty and unique within a
    /// render batch; row order is significant and preserved end to end.
    #[must_use]
    pub fn builder(id: impl Into<String>, rows: Vec<DataRow>) -> ChartSpecBuilder {
        ChartSpecBuilder {
            id: id.into(),
            title: String::new(),
            chart_type: ChartType::Bar,
            rows,
            dimensions: None,
            encode: None,
            group_field: None,
            options: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn chart_type(&self) -> &ChartType {
        &self.chart_type
    }

    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<&[String]> {
        self.dimensions.as_deref()
    }

    #[must_use]
    pub fn encode(&self) -> &EncodeMapping {
        &self.encode
    }

    #[must_use]
    pub fn group_field(&self) -> Option<&str> {
        self.group_field.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> Option<&serde_json::Value> {
        self.options.as_ref()
    }

    /// Produces a replacement spec carrying the same id with new rows.
    /// Re-sending it updates the same on-surface chart instance.
    #[must_use]
    pub fn with_rows(&self, rows: Vec<DataRow>) -> Self {
        Self {
            rows,
            ..self.clone()
        }
    }

    /// Reports, per referenced field, how many rows lack that field.
    ///
    /// Field presence is deliberately not a construction error: rows may be
    /// heterogeneous and the surface omits missing data silently. The lint
    /// gives producers a way to catch mapping typos before rendering.
    #[must_use]
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();
        for (role, field) in self.encode.iter() {
            self.lint_field(field, LintSource::EncodeRole(role.to_owned()), &mut findings);
        }
        if let Some(field) = self.group_field.as_deref() {
            self.lint_field(field, LintSource::GroupField, &mut findings);
        }
        findings
    }

    fn lint_field(&self, field: &str, source: LintSource, findings: &mut Vec<LintFinding>) {
        let missing_rows = self
            .rows
            .iter()
            .filter(|row| !row.contains_key(field))
            .count();
        if missing_rows > 0 {
            findings.push(LintFinding {
                field: field.to_owned(),
                source,
                missing_rows,
            });
        }
    }
}

/// One field-presence problem reported by [`ChartSpec::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub field: String,
    pub source: LintSource,
    pub missing_rows: usize,
}

/// Where a linted field was referenced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintSource {
    EncodeRole(String),
    GroupField,
}

/// Validated construction for [`ChartSpec`].
#[derive(Debug)]
pub struct ChartSpecBuilder {
    id: String,
    title: String,
    chart_type: ChartType,
    rows: Vec<DataRow>,
    dimensions: Option<Vec<String>>,
    encode: Option<EncodeMapping>,
    group_field: Option<String>,
    options: Option<serde_json::Value>,
}

impl ChartSpecBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Explicit dimension list, forwarded verbatim to the surface. Takes
    /// precedence over any implicit field inference.
    #[must_use]
    pub fn dimensions(mut self, dimensions: Vec<String>) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    #[must_use]
    pub fn encode(mut self, encode: EncodeMapping) -> Self {
        self.encode = Some(encode);
        self
    }

    /// Grouping field. When set, rows are pivoted into one series per
    /// distinct group value before serialization.
    #[must_use]
    pub fn group_field(mut self, field: impl Into<String>) -> Self {
        self.group_field = Some(field.into());
        self
    }

    /// Free-form style/behavior overrides, passed through opaquely.
    #[must_use]
    pub fn options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> ChartResult<ChartSpec> {
        if self.id.is_empty() {
            return Err(ChartError::InvalidSpec("chart id cannot be empty".to_owned()));
        }
        let Some(encode) = self.encode else {
            return Err(ChartError::InvalidSpec(format!(
                "chart '{}' has no encode mapping",
                self.id
            )));
        };
        if encode.is_empty() && self.chart_type.is_builtin() {
            return Err(ChartError::InvalidSpec(format!(
                "chart '{}' of built-in type '{}' requires a non-empty encode mapping",
                self.id, self.chart_type
            )));
        }
        Ok(ChartSpec {
            id: self.id,
            title: self.title,
            chart_type: self.chart_type,
            rows: self.rows,
            dimensions: self.dimensions,
            encode,
            group_field: self.group_field,
            options: self.options,
        })
    }
}
