use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body from weatherapi.com (or the proxy), untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeatherPayload(pub Value);

impl RawWeatherPayload {
    /// Provider error message, if the body is an error object.
    pub fn error_message(&self) -> Option<&str> {
        let error = self.0.get("error").filter(|error| error.is_object())?;
        Some(error.get("message").and_then(Value::as_str).unwrap_or("Unknown error"))
    }
}

/// One formatted row, e.g. `temperature` / `90°F`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// Ordered label/value table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherTable(Vec<Row>);

impl WeatherTable {
    pub fn push(&mut self, label: &str, value: String) {
        self.0.push(Row { label: label.to_string(), value });
    }

    /// Value for `label`, if present.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.iter().find(|row| row.label == label).map(|row| row.value.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|row| row.label.as_str())
    }

    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub title: String,
    pub table: WeatherTable,
}

/// Render-ready weather report. Every value is already formatted for one unit system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReport {
    /// `"{name}, {region}"`.
    pub location: String,
    /// e.g. `"Thursday, July 4 | 17:30"`.
    pub localtime: String,
    pub condition: String,
    pub is_day: bool,
    pub current: WeatherTable,
    /// Today followed by the next two days.
    pub forecast: Vec<ForecastTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_extracted_from_error_object() {
        let payload = RawWeatherPayload(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        }));
        assert_eq!(payload.error_message(), Some("No matching location found."));
    }

    #[test]
    fn error_without_message_still_reported() {
        let payload = RawWeatherPayload(json!({ "error": {} }));
        assert_eq!(payload.error_message(), Some("Unknown error"));
    }

    #[test]
    fn null_error_field_is_not_an_error() {
        let payload = RawWeatherPayload(json!({ "error": null, "location": {} }));
        assert_eq!(payload.error_message(), None);

        let payload = RawWeatherPayload(json!({ "error": "", "location": {} }));
        assert_eq!(payload.error_message(), None);
    }

    #[test]
    fn no_error_for_regular_payload() {
        let payload = RawWeatherPayload(json!({ "location": { "name": "NYC" } }));
        assert_eq!(payload.error_message(), None);
    }

    #[test]
    fn table_keeps_insertion_order() {
        let mut table = WeatherTable::default();
        table.push("temperature", "90°F".into());
        table.push("wind", "5 mph N".into());

        assert_eq!(table.labels().collect::<Vec<_>>(), ["temperature", "wind"]);
        assert_eq!(table.get("wind"), Some("5 mph N"));
        assert_eq!(table.get("gusts"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_serializes_as_row_list() {
        let mut table = WeatherTable::default();
        table.push("humidity", "40%".into());

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value, json!([{ "label": "humidity", "value": "40%" }]));
    }
}
