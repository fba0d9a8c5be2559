use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A point in model space, `[x, y, z]`.
pub type Coordinates = [f64; 3];

/// The closed set of solids the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Prism,
    Pyramid,
    Cone,
    Cylinder,
    Sphere,
}

impl GeometryType {
    pub const ALL: [GeometryType; 5] = [
        GeometryType::Pyramid,
        GeometryType::Prism,
        GeometryType::Cone,
        GeometryType::Cylinder,
        GeometryType::Sphere,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            GeometryType::Prism => "prism",
            GeometryType::Pyramid => "pyramid",
            GeometryType::Cone => "cone",
            GeometryType::Cylinder => "cylinder",
            GeometryType::Sphere => "sphere",
        }
    }

    /// The Chinese name the prompt template asks the model to use.
    pub fn alias(&self) -> &'static str {
        match self {
            GeometryType::Prism => "棱柱",
            GeometryType::Pyramid => "棱锥",
            GeometryType::Cone => "圆锥",
            GeometryType::Cylinder => "圆柱",
            GeometryType::Sphere => "球体",
        }
    }

    fn extra_aliases(&self) -> &'static [&'static str] {
        match self {
            GeometryType::Prism => &["cube", "正方体", "长方体"],
            GeometryType::Pyramid => &[],
            GeometryType::Cone => &["圆锥体"],
            GeometryType::Cylinder => &["圆柱体"],
            GeometryType::Sphere => &["球"],
        }
    }

    /// Resolves a canonical name or alias. ASCII case and surrounding
    /// whitespace are ignored.
    pub fn from_alias(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL.into_iter().find(|kind| {
            needle.eq_ignore_ascii_case(kind.canonical_name())
                || needle == kind.alias()
                || kind
                    .extra_aliases()
                    .iter()
                    .any(|alias| needle.eq_ignore_ascii_case(alias))
        })
    }

    /// Dimension names read for this solid, with the value used when the
    /// model leaves one out.
    pub fn dimension_keys(&self) -> &'static [(&'static str, f64)] {
        match self {
            GeometryType::Prism => &[("width", 1.0), ("height", 1.0), ("depth", 1.0)],
            GeometryType::Pyramid => &[("baseWidth", 1.0), ("height", 2.0)],
            GeometryType::Cone => &[("radius", 1.0), ("height", 2.0)],
            GeometryType::Cylinder => &[
                ("radiusTop", 1.0),
                ("radiusBottom", 1.0),
                ("height", 2.0),
            ],
            GeometryType::Sphere => &[("radius", 1.0)],
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl Serialize for GeometryType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.canonical_name())
    }
}

/// Named numeric measurements of the solid. Individual entries may be
/// missing; consumers fall back to [`GeometryType::dimension_keys`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dimensions(BTreeMap<String, f64>);

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// The dimensions `geometry_type` needs, defaults filled in.
    pub fn resolved(&self, geometry_type: GeometryType) -> Vec<(&'static str, f64)> {
        geometry_type
            .dimension_keys()
            .iter()
            .map(|&(name, default)| (name, self.get_or(name, default)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperLine {
    pub start: Coordinates,
    pub end: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated figure description, produced fresh for every request.
///
/// Fields are only reachable through accessors so a schema cannot be
/// altered once the validator has built it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySchema {
    geometry_type: GeometryType,
    dimensions: Dimensions,
    points: Vec<Point>,
    helper_lines: Vec<HelperLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl GeometrySchema {
    pub(crate) fn new(
        geometry_type: GeometryType,
        dimensions: Dimensions,
        points: Vec<Point>,
        helper_lines: Vec<HelperLine>,
        description: Option<String>,
    ) -> Self {
        Self {
            geometry_type,
            dimensions,
            points,
            helper_lines,
            description,
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|point| point.name == name)
    }

    pub fn helper_lines(&self) -> &[HelperLine] {
        &self.helper_lines
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
