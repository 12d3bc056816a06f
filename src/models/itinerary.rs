use serde::{Deserialize, Serialize};

/// Multi-day plan as produced by the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub trip_details: TripDetails,
    pub itinerary: Vec<DayPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub theme: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub place: String,
    pub description: String,
    #[serde(default)]
    pub location_area: String,
    pub map_query: String,
}

impl Itinerary {
    pub fn day_count(&self) -> usize {
        self.itinerary.len()
    }
}
