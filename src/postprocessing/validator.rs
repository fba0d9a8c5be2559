//! Checks a parsed model answer against the geometry schema and builds the
//! typed [`GeometrySchema`]. Stops at the first violation.

use crate::config::Locale;
use crate::geometry::{Coordinates, Dimensions, GeometrySchema, GeometryType, HelperLine, Point};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Expected a JSON object")]
    NotAnObject,
    #[error("Missing geometry type")]
    MissingGeometryType,
    #[error("Missing dimensions")]
    MissingDimensions,
    #[error("Malformed dimensions: expected an object")]
    MalformedDimensions,
    #[error("Dimension `{field}` must be a number")]
    MalformedDimension { field: String },
    #[error("Missing or malformed points")]
    MissingPoints,
    #[error("Point #{index} has no name")]
    MissingPointName { index: usize },
    #[error("Malformed coordinates for point `{point}`")]
    MalformedCoordinates { point: String },
    #[error("Duplicate point `{name}`")]
    DuplicatePoint { name: String },
    #[error("Malformed helper lines: expected an array")]
    MalformedHelperLines,
    #[error("Malformed start or end for helper line #{index}")]
    MalformedHelperLine { index: usize },
    #[error("Unsupported geometry type: {name}")]
    UnsupportedGeometryType { name: String },
}

impl ValidationError {
    /// Name of the schema field the violation refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotAnObject => "",
            ValidationError::MissingGeometryType
            | ValidationError::UnsupportedGeometryType { .. } => "geometryType",
            ValidationError::MissingDimensions
            | ValidationError::MalformedDimensions
            | ValidationError::MalformedDimension { .. } => "dimensions",
            ValidationError::MissingPoints
            | ValidationError::MissingPointName { .. }
            | ValidationError::MalformedCoordinates { .. }
            | ValidationError::DuplicatePoint { .. } => "points",
            ValidationError::MalformedHelperLines | ValidationError::MalformedHelperLine { .. } => {
                "helperLines"
            }
        }
    }

    pub fn localized_message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::ZhCn => match self {
                ValidationError::NotAnObject => "返回内容不是JSON对象".to_string(),
                ValidationError::MissingGeometryType => "缺少几何体类型".to_string(),
                ValidationError::MissingDimensions => "缺少尺寸信息".to_string(),
                ValidationError::MalformedDimensions => "尺寸信息格式错误".to_string(),
                ValidationError::MalformedDimension { field } => {
                    format!("尺寸{}必须是数字", field)
                }
                ValidationError::MissingPoints => "缺少点坐标信息或格式错误".to_string(),
                ValidationError::MissingPointName { index } => {
                    format!("第{}个点缺少名称", index + 1)
                }
                ValidationError::MalformedCoordinates { point } => {
                    format!("点{}的坐标格式错误", point)
                }
                ValidationError::DuplicatePoint { name } => format!("点{}重复出现", name),
                ValidationError::MalformedHelperLines => "辅助线格式错误".to_string(),
                ValidationError::MalformedHelperLine { index } => {
                    format!("第{}条辅助线的坐标格式错误", index + 1)
                }
                ValidationError::UnsupportedGeometryType { name } => {
                    format!("不支持的几何体类型：{}", name)
                }
            },
        }
    }
}

pub fn validate(value: &Value) -> Result<GeometrySchema, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let type_name = object
        .get("geometryType")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingGeometryType)?;

    let resolved_type = GeometryType::from_alias(type_name);

    let dimensions = validate_dimensions(object, resolved_type)?;
    let points = validate_points(object)?;
    let helper_lines = validate_helper_lines(object)?;

    let geometry_type = resolved_type.ok_or_else(|| ValidationError::UnsupportedGeometryType {
        name: type_name.to_string(),
    })?;

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(GeometrySchema::new(
        geometry_type,
        dimensions,
        points,
        helper_lines,
        description,
    ))
}

/// Only the keys the solid is drawn from must be numeric. Anything else the
/// model adds (a unit, a note) is skipped.
fn validate_dimensions(
    object: &Map<String, Value>,
    geometry_type: Option<GeometryType>,
) -> Result<Dimensions, ValidationError> {
    let entries = match object.get("dimensions") {
        None | Some(Value::Null) => return Err(ValidationError::MissingDimensions),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err(ValidationError::MalformedDimensions),
    };

    let is_drawn_from = |field: &str| {
        geometry_type.map_or(false, |kind| {
            kind.dimension_keys().iter().any(|&(key, _)| key == field)
        })
    };

    let mut dimensions = Dimensions::new();
    for (field, value) in entries {
        match value.as_f64() {
            Some(number) => dimensions.insert(field.clone(), number),
            // absent and null entries fall back to defaults when rendered
            None if value.is_null() => continue,
            None if is_drawn_from(field) => {
                return Err(ValidationError::MalformedDimension {
                    field: field.clone(),
                })
            }
            None => debug!(field = %field, value = %value, "Skipping non-numeric dimension"),
        }
    }

    Ok(dimensions)
}

fn validate_points(object: &Map<String, Value>) -> Result<Vec<Point>, ValidationError> {
    let raw_points = object
        .get("points")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingPoints)?;

    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(raw_points.len());

    for (index, raw) in raw_points.iter().enumerate() {
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingPointName { index })?;

        let coordinates = parse_coordinates(raw.get("coordinates")).ok_or_else(|| {
            ValidationError::MalformedCoordinates {
                point: name.to_string(),
            }
        })?;

        if !seen.insert(name) {
            return Err(ValidationError::DuplicatePoint {
                name: name.to_string(),
            });
        }

        points.push(Point {
            name: name.to_string(),
            coordinates,
        });
    }

    Ok(points)
}

fn validate_helper_lines(object: &Map<String, Value>) -> Result<Vec<HelperLine>, ValidationError> {
    let raw_lines = match object.get("helperLines") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(lines)) => lines,
        Some(_) => return Err(ValidationError::MalformedHelperLines),
    };

    raw_lines
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let start = parse_coordinates(raw.get("start"));
            let end = parse_coordinates(raw.get("end"));
            let (Some(start), Some(end)) = (start, end) else {
                return Err(ValidationError::MalformedHelperLine { index });
            };

            let color = match raw.get("color") {
                Some(Value::String(color)) => Some(color.clone()),
                Some(Value::Number(color)) => Some(color.to_string()),
                _ => None,
            };

            Ok(HelperLine {
                start,
                end,
                color,
                description: raw
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

/// Exactly three numeric components, or nothing.
fn parse_coordinates(value: Option<&Value>) -> Option<Coordinates> {
    match value?.as_array()?.as_slice() {
        [x, y, z] => Some([x.as_f64()?, y.as_f64()?, z.as_f64()?]),
        _ => None,
    }
}
