use serde::{Deserialize, Serialize};

/// Field event posted through `create_event`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub username: String,
    pub location: String,
    pub time: String,
    #[serde(rename = "timeRange")]
    pub time_range: String,
    #[serde(rename = "isTimeFixed")]
    pub is_time_fixed: bool,
    #[serde(rename = "isLocationFixed")]
    pub is_location_fixed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_names() {
        let event = Event {
            username: "ivy".to_string(),
            location: "Riverside park".to_string(),
            time: "2025-05-01".to_string(),
            time_range: "9am-noon".to_string(),
            is_time_fixed: true,
            is_location_fixed: false,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["timeRange"], "9am-noon");
        assert_eq!(value["isTimeFixed"], true);
        assert_eq!(value["isLocationFixed"], false);
    }
}
