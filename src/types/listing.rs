//! Raw listing record as submitted through the form

use crate::error::PredictionError;
use serde_json::Value;
use std::collections::HashMap;

/// Form field names in submission order.
pub const INPUT_FIELDS: [&str; 18] = [
    "bedrooms",
    "bathrooms",
    "living_area",
    "lot_area",
    "floors",
    "waterfront",
    "views",
    "condition",
    "grade",
    "basement_area",
    "built_year",
    "renovation_year",
    "postal_code",
    "latitude",
    "longitude",
    "lot_area_renov",
    "schools_nearby",
    "airport_distance",
];

/// Spelling of the latitude field used by older versions of the form.
const LATITUDE_ALIAS: &str = "lattitude";

/// One user-entered real-estate record, parsed to its declared numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub bedrooms: f64,
    pub bathrooms: f64,
    /// Living area in square feet
    pub living_area: f64,
    /// Lot area in square feet
    pub lot_area: f64,
    pub floors: f64,
    /// 1 when the property is on the waterfront
    pub waterfront: i64,
    pub views: i64,
    pub condition: i64,
    pub grade: i64,
    pub basement_area: f64,
    pub built_year: i64,
    /// 0 when the house was never renovated
    pub renovation_year: i64,
    pub postal_code: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Lot area after renovation
    pub lot_area_renov: f64,
    pub schools_nearby: i64,
    pub airport_distance: f64,
}

impl RawListing {
    /// Parse a submitted form. Every field is required.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, PredictionError> {
        let get = |name: &str| lookup(form, name);

        Ok(Self {
            bedrooms: parse_float("bedrooms", get("bedrooms")?)?,
            bathrooms: parse_float("bathrooms", get("bathrooms")?)?,
            living_area: parse_float("living_area", get("living_area")?)?,
            lot_area: parse_float("lot_area", get("lot_area")?)?,
            floors: parse_float("floors", get("floors")?)?,
            waterfront: parse_int("waterfront", get("waterfront")?)?,
            views: parse_int("views", get("views")?)?,
            condition: parse_int("condition", get("condition")?)?,
            grade: parse_int("grade", get("grade")?)?,
            basement_area: parse_float("basement_area", get("basement_area")?)?,
            built_year: parse_int("built_year", get("built_year")?)?,
            renovation_year: parse_int("renovation_year", get("renovation_year")?)?,
            postal_code: parse_int("postal_code", get("postal_code")?)?,
            latitude: parse_float("latitude", get("latitude")?)?,
            longitude: parse_float("longitude", get("longitude")?)?,
            lot_area_renov: parse_float("lot_area_renov", get("lot_area_renov")?)?,
            schools_nearby: parse_int("schools_nearby", get("schools_nearby")?)?,
            airport_distance: parse_float("airport_distance", get("airport_distance")?)?,
        })
    }

    /// Parse a JSON object. Values may be numbers or numeric strings.
    pub fn from_json(body: &serde_json::Map<String, Value>) -> Result<Self, PredictionError> {
        let mut form = HashMap::with_capacity(body.len());
        for (key, value) in body {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Null => continue,
                other => {
                    return Err(PredictionError::invalid_field(key, &other.to_string(), "number"))
                }
            };
            form.insert(key.clone(), text);
        }
        Self::from_form(&form)
    }
}

fn lookup<'a>(form: &'a HashMap<String, String>, name: &str) -> Result<&'a str, PredictionError> {
    form.get(name)
        .or_else(|| {
            if name == "latitude" {
                form.get(LATITUDE_ALIAS)
            } else {
                None
            }
        })
        .map(String::as_str)
        .ok_or_else(|| PredictionError::missing_field(name))
}

fn parse_float(field: &str, raw: &str) -> Result<f64, PredictionError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PredictionError::invalid_field(field, raw, "float"))?;

    if !value.is_finite() {
        return Err(PredictionError::invalid_field(field, raw, "finite float"));
    }
    Ok(value)
}

fn parse_int(field: &str, raw: &str) -> Result<i64, PredictionError> {
    raw.trim()
        .parse()
        .map_err(|_| PredictionError::invalid_field(field, raw, "integer"))
}
