use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One tracked position, as submitted by a device and as returned by
/// `/latest-location`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationRecord {
    #[serde(rename = "uniqueID")]
    pub unique_id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    #[serde(deserialize_with = "lenient_i64")]
    pub floor: i64,
}

/// Clients send numbers either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => i as f64,
        NumberOrString::Float(f) => f,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got \"{}\"", s)))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(D::Error::custom("expected a finite number"))
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => Ok(i),
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        NumberOrString::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        NumberOrString::Float(f) => Err(D::Error::custom(format!("expected an integer, got {}", f))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected an integer, got \"{}\"", s))),
    }
}

#[cfg(test)]
impl LocationRecord {
    pub fn new(unique_id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64, floor: i64) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            latitude,
            longitude,
            floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let record = LocationRecord::new("1", "A", 12.5, 77.5, 2);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json, serde_json::json!({
            "uniqueID": "1",
            "name": "A",
            "latitude": 12.5,
            "longitude": 77.5,
            "floor": 2
        }));
    }

    #[test]
    fn accepts_integer_coordinates() {
        let record: LocationRecord = serde_json::from_str(
            r#"{"name": "B", "uniqueID": "x", "floor": -1, "latitude": 12, "longitude": 77}"#,
        ).unwrap();

        assert_eq!(record, LocationRecord::new("x", "B", 12.0, 77.0, -1));
    }

    #[test]
    fn coerces_numeric_strings_and_integral_floats() {
        let record: LocationRecord = serde_json::from_str(
            r#"{"name": "C", "uniqueID": "9", "floor": "2", "latitude": "12.5", "longitude": " 77.5 "}"#,
        ).unwrap();
        assert_eq!(record, LocationRecord::new("9", "C", 12.5, 77.5, 2));

        let record: LocationRecord = serde_json::from_str(
            r#"{"name": "C", "uniqueID": "9", "floor": 3.0, "latitude": 1, "longitude": "-4"}"#,
        ).unwrap();
        assert_eq!(record, LocationRecord::new("9", "C", 1.0, -4.0, 3));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        for body in [
            r#"{"name": "C", "uniqueID": "9", "floor": 2, "latitude": "north", "longitude": 77.5}"#,
            r#"{"name": "C", "uniqueID": "9", "floor": "2.5", "latitude": 12.5, "longitude": 77.5}"#,
            r#"{"name": "C", "uniqueID": "9", "floor": 2, "latitude": "NaN", "longitude": 77.5}"#,
            r#"{"name": "C", "uniqueID": "9", "floor": true, "latitude": 12.5, "longitude": 77.5}"#,
        ] {
            assert!(serde_json::from_str::<LocationRecord>(body).is_err(), "accepted {}", body);
        }
    }

    #[test]
    fn rejects_fractional_floor() {
        let result = serde_json::from_str::<LocationRecord>(
            r#"{"name": "B", "uniqueID": "x", "floor": 1.5, "latitude": 12, "longitude": 77}"#,
        );

        assert!(result.is_err());
    }
}
