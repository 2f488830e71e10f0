//! Wire types for the report HTTP contract.
//!
//! Shared by the submission client and the `/api/report` handler so both
//! sides of the contract deserialize and serialize the same shapes.

use serde::{Deserialize, Serialize};

/// Number of order-dump slots in a submission.
pub const SLOT_COUNT: usize = 8;

/// Body of `POST /api/report`.
///
/// Eight free-text slots holding raw order-history JSON as pasted by the
/// user. Slots are transmitted verbatim; unfilled slots are empty strings,
/// and all eight keys are always present in the serialized body. Absent or
/// `null` fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders2: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders3: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders4: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders5: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders6: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders7: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders8: String,
}

impl SubmissionPayload {
    /// Build a payload from slot values in `orders1..orders8` order.
    pub fn from_slots(slots: [String; SLOT_COUNT]) -> Self {
        let [orders1, orders2, orders3, orders4, orders5, orders6, orders7, orders8] = slots;
        Self {
            orders1,
            orders2,
            orders3,
            orders4,
            orders5,
            orders6,
            orders7,
            orders8,
        }
    }

    /// The slot values in `orders1..orders8` order.
    pub fn slots(&self) -> [&str; SLOT_COUNT] {
        [
            &self.orders1,
            &self.orders2,
            &self.orders3,
            &self.orders4,
            &self.orders5,
            &self.orders6,
            &self.orders7,
            &self.orders8,
        ]
    }

    /// True if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|s| s.is_empty())
    }
}

/// Body of a successful report response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Opaque report identifier; resolves to `reports/<guid>.png`.
    pub guid: String,
}

/// Deserialize a string field treating JSON `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_payload_serializes_all_eight_keys() {
        let json = serde_json::to_value(SubmissionPayload::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), SLOT_COUNT);
        for i in 1..=SLOT_COUNT {
            assert_eq!(obj[&format!("orders{}", i)], "");
        }
    }

    #[test]
    fn slots_are_passed_through_verbatim() {
        let payload = SubmissionPayload {
            orders1: "  {\"raw\": true}  ".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["orders1"], "  {\"raw\": true}  ");
        assert_eq!(json["orders2"], "");
    }

    #[test]
    fn absent_and_null_slots_deserialize_empty() {
        let payload: SubmissionPayload =
            serde_json::from_str(r#"{"orders1": "x", "orders3": null}"#).unwrap();
        assert_eq!(payload.orders1, "x");
        assert_eq!(payload.orders2, "");
        assert_eq!(payload.orders3, "");
        assert!(!payload.is_empty());
        assert!(SubmissionPayload::default().is_empty());
    }

    #[test]
    fn from_slots_round_trips() {
        let slots: [String; SLOT_COUNT] =
            std::array::from_fn(|i| format!("dump {}", i + 1));
        let payload = SubmissionPayload::from_slots(slots.clone());
        assert_eq!(payload.slots()[0], "dump 1");
        assert_eq!(payload.slots()[7], "dump 8");
    }

    #[test]
    fn report_response_requires_guid() {
        assert!(serde_json::from_str::<ReportResponse>(r#"{"ok": true}"#).is_err());
        let resp: ReportResponse = serde_json::from_str(r#"{"guid": "9f1a"}"#).unwrap();
        assert_eq!(resp.guid, "9f1a");
    }
}
