use serde::{Deserialize, Serialize};

// Data structures for the supplier availability document.
// Records stay untyped until the finder validates them one by one, so a single
// bad entry can be reported with its position in the array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AvailabilityDocument {
    pub product_availabilities: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawAvailability {
    pub places_available: u32,
    pub activity_duration_in_minutes: u32,
    pub product_id: u64,
    pub activity_start_datetime: String,
}

impl AvailabilityDocument {
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn len(&self) -> usize {
        self.product_availabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_availabilities.is_empty()
    }
}

impl TryFrom<Vec<RawAvailability>> for AvailabilityDocument {
    type Error = serde_json::Error;

    fn try_from(records: Vec<RawAvailability>) -> Result<Self, Self::Error> {
        Ok(Self {
            product_availabilities: records
                .into_iter()
                .map(serde_json::to_value)
                .collect::<Result<_, _>>()?,
        })
    }
}
