use serde::{Deserialize, Serialize};

use super::args::{Fragments, ToArgs};

/// Generic `-device driver[,prop=value...]`.
///
/// `properties` is an already-joined property list appended verbatim, which
/// covers device families without a dedicated option struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub properties: String,
}

impl DeviceOptions {
    pub fn new(driver: impl Into<String>, properties: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            properties: properties.into(),
        }
    }
}

impl ToArgs for DeviceOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::head(self.driver.as_str())
            .raw(&self.properties)
            .finish("-device")
    }
}
