use serde_json::Value;
use thiserror::Error;

use super::{AliasTable, CanonicalField};

/// Candidate row for the `weather` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    pub location: Option<String>,
    pub date: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub description: Option<String>,
}

/// Candidate row for the `precipitation` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecipitationReading {
    pub location: Option<String>,
    pub date: Option<String>,
    /// Upstream window label such as `Past1hr`, kept verbatim
    pub period: Option<String>,
    pub precipitation: Option<f64>,
}

/// Everything one location fragment contributes to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFragment {
    pub weather: Option<WeatherObservation>,
    pub precipitation: Vec<PrecipitationReading>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("fragment is not an object (found {kind})")]
    NotAnObject { kind: &'static str },
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Map one location fragment onto candidate rows.
///
/// Missing or malformed optional fields never fail the fragment; only a
/// fragment that is not a JSON object is rejected.
pub fn normalize_fragment(
    fragment: &Value,
    aliases: &AliasTable,
) -> Result<NormalizedFragment, NormalizeError> {
    if !fragment.is_object() {
        return Err(NormalizeError::NotAnObject {
            kind: json_kind(fragment),
        });
    }

    let elements = weather_elements(fragment, aliases);
    let field = |name| resolve_field(fragment, &elements, aliases, name);

    let location = field(CanonicalField::Location).and_then(as_text);
    let date = field(CanonicalField::Date).and_then(as_text);
    let min_temp = field(CanonicalField::MinTemp).and_then(as_number);
    let max_temp = field(CanonicalField::MaxTemp).and_then(as_number);
    let description = field(CanonicalField::Description).and_then(as_text);

    let precipitation = precipitation_readings(fragment, aliases, &location, &date);

    // One weather row per station, rain gauges included.
    let weather = Some(WeatherObservation {
        location,
        date,
        min_temp,
        max_temp,
        description,
    });

    Ok(NormalizedFragment {
        weather,
        precipitation,
    })
}

fn resolve_field<'a>(
    fragment: &'a Value,
    elements: &[&'a Value],
    aliases: &AliasTable,
    field: CanonicalField,
) -> Option<&'a Value> {
    let field_aliases = aliases.aliases_for(field)?;

    if let Some(value) = first_present(fragment, field_aliases.pointers) {
        return Some(value);
    }

    let from_elements = if field == CanonicalField::Date {
        elements
            .iter()
            .copied()
            .find_map(|element| first_present(element, aliases.element_time))
    } else {
        elements
            .iter()
            .copied()
            .filter(|element| element_matches(element, aliases, field_aliases.element_names))
            .find_map(|element| first_present(element, aliases.element_value))
    };

    from_elements.or_else(|| first_present(fragment, field_aliases.fallback))
}

fn weather_elements<'a>(fragment: &'a Value, aliases: &AliasTable) -> Vec<&'a Value> {
    aliases
        .element_list
        .iter()
        .find_map(|pointer| fragment.pointer(pointer).and_then(Value::as_array))
        .map(|elements| elements.iter().filter(|e| e.is_object()).collect())
        .unwrap_or_default()
}

fn element_matches(element: &Value, aliases: &AliasTable, names: &[&str]) -> bool {
    let Some(name) = first_present(element, aliases.element_name).and_then(as_text) else {
        return false;
    };
    names.iter().any(|alias| alias.eq_ignore_ascii_case(&name))
}

fn precipitation_readings(
    fragment: &Value,
    aliases: &AliasTable,
    location: &Option<String>,
    date: &Option<String>,
) -> Vec<PrecipitationReading> {
    let container = aliases
        .precipitation_container
        .iter()
        .filter_map(|pointer| fragment.pointer(pointer))
        .find(|value| value.is_object() || value.is_array());

    let reading = |period: Option<String>, precipitation: Option<f64>| PrecipitationReading {
        location: location.clone(),
        date: date.clone(),
        period,
        precipitation,
    };

    match container {
        Some(Value::Object(by_period)) => by_period
            .iter()
            .map(|(period, value)| reading(Some(period.clone()), period_value(value, aliases)))
            .collect(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(|entry| {
                reading(
                    first_present(entry, aliases.reading_period).and_then(as_text),
                    first_present(entry, aliases.reading_value).and_then(as_number),
                )
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn period_value(value: &Value, aliases: &AliasTable) -> Option<f64> {
    match value {
        Value::Object(_) => first_present(value, aliases.precipitation_value).and_then(as_number),
        other => present(other).and_then(as_number),
    }
}

/// First alias whose value is a non-empty scalar.
fn first_present<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a Value> {
    pointers
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(present))
}

fn present(value: &Value) -> Option<&Value> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
