use chrono::Duration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::duration;

use crate::ExampleData;

pub const SERVICE_DESCRIPTION: &str = "Service for IGC tracks.";
pub const SERVICE_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(with = "duration")]
    #[schemars(schema_with = "duration::schema")]
    pub uptime: Duration,
    pub info: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn with_uptime(uptime: Duration) -> Self {
        Self {
            uptime,
            info: SERVICE_DESCRIPTION.to_owned(),
            version: SERVICE_VERSION.to_owned(),
        }
    }
}

impl ExampleData for ServiceInfo {
    fn example_data() -> Self {
        Self::with_uptime(Duration::minutes(90))
    }
}
