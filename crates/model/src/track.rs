use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::{track_length, Coordinates},
    id::{HasId, Id},
};

use crate::ExampleData;

/// A submitted flight log url. Written once, never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackReference {
    pub id: Id<TrackReference>,
    pub url: String,
}

impl HasId for TrackReference {
    type IdType = usize;
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub time: Option<NaiveTime>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            time: None,
        }
    }

    pub fn at(self, time: NaiveTime) -> Self {
        Self {
            time: Some(time),
            ..self
        }
    }
}

impl Coordinates for GeoPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A flight log as read from its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTrack {
    pub date: NaiveDate,
    pub pilot: String,
    pub glider_type: String,
    pub glider_id: String,
    pub points: Vec<GeoPoint>,
}

impl ParsedTrack {
    /// Length of the flown track in kilometers.
    pub fn length_km(&self) -> f64 {
        track_length(&self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackSummary {
    pub h_date: String,
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    /// Kilometers.
    pub track_length: f64,
}

impl TrackSummary {
    pub fn field(&self, field: TrackField) -> TrackFieldValue {
        match field {
            TrackField::Pilot => TrackFieldValue::Text(self.pilot.clone()),
            TrackField::Glider => TrackFieldValue::Text(self.glider.clone()),
            TrackField::GliderId => TrackFieldValue::Text(self.glider_id.clone()),
            TrackField::TrackLength => TrackFieldValue::Number(self.track_length),
            TrackField::HDate => TrackFieldValue::Text(self.h_date.clone()),
        }
    }
}

impl ExampleData for TrackSummary {
    fn example_data() -> Self {
        Self {
            h_date: "2016-02-19".to_owned(),
            pilot: "Miguel Angel Gordillo".to_owned(),
            glider: "RV8".to_owned(),
            glider_id: "EC-XLL".to_owned(),
            track_length: 443.2573603705269,
        }
    }
}

/// The summary fields which can be requested one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Pilot,
    Glider,
    GliderId,
    TrackLength,
    HDate,
}

impl TrackField {
    pub const ALL: [TrackField; 5] = [
        TrackField::Pilot,
        TrackField::Glider,
        TrackField::GliderId,
        TrackField::TrackLength,
        TrackField::HDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrackField::Pilot => "pilot",
            TrackField::Glider => "glider",
            TrackField::GliderId => "glider_id",
            TrackField::TrackLength => "track_length",
            TrackField::HDate => "h_date",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrackField(pub String);

impl fmt::Display for UnknownTrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown track field: {}", self.0)
    }
}

impl std::error::Error for UnknownTrackField {}

impl FromStr for TrackField {
    type Err = UnknownTrackField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pilot" => Ok(TrackField::Pilot),
            "glider" => Ok(TrackField::Glider),
            "glider_id" => Ok(TrackField::GliderId),
            "track_length" => Ok(TrackField::TrackLength),
            "h_date" => Ok(TrackField::HDate),
            other => Err(UnknownTrackField(other.to_owned())),
        }
    }
}

/// A single summary field, serialized as a bare json scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackFieldValue {
    Number(f64),
    Text(String),
}
