//! API request and response bodies

use serde::{Deserialize, Serialize};

use crate::coord::Location;
use crate::registry::{Driver, DriverId};

/// Position report submitted by a driver client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverPayload {
    /// Client-side send time in epoch seconds; accepted but not recorded.
    #[serde(default)]
    pub timestamp: i64,
    pub driver_id: DriverId,
    pub location: Location,
}

/// Driver details as exposed over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverBody {
    pub id: DriverId,
    pub location: Location,
}

impl From<&Driver> for DriverBody {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            location: driver.last_location,
        }
    }
}

/// Envelope wrapped around every API reply.
///
/// The optional sections are omitted from the JSON entirely when empty,
/// so plain acknowledgements stay two fields long.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<DriverBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers: Option<Vec<DriverBody>>,
}

impl ApiResponse {
    /// Successful reply carrying only a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            driver: None,
            drivers: None,
        }
    }

    /// Failed reply carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            driver: None,
            drivers: None,
        }
    }

    /// Attaches a single driver section.
    pub fn with_driver(mut self, driver: DriverBody) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Attaches a driver list section.
    pub fn with_drivers(mut self, drivers: Vec<DriverBody>) -> Self {
        self.drivers = Some(drivers);
        self
    }
}
