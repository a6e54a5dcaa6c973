//! Passive radar illuminators of opportunity

use serde::{Deserialize, Serialize};

/// Transmitter lighting up targets for passive radar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Illuminator {
    #[serde(rename = "type")]
    pub kind: String,
    /// Carrier frequency in Hz
    pub frequency: f64,
    pub power_dbm: f64,
}

impl Illuminator {
    fn new(kind: &str, frequency: f64, power_dbm: f64) -> Self {
        Self {
            kind: kind.to_string(),
            frequency,
            power_dbm,
        }
    }

    /// Operator-specified transmitter
    pub fn custom(frequency: f64) -> Self {
        Self::new("Custom", frequency, 50.0)
    }
}

/// Broadcast and cellular transmitters commonly used as illuminators
pub fn illuminator_catalog() -> [Illuminator; 4] {
    [
        Illuminator::new("FM_Radio", 98.5e6, 60.0),
        Illuminator::new("DVB-T", 578e6, 55.0),
        Illuminator::new("GSM", 945e6, 45.0),
        Illuminator::new("WiFi", 2.4e9, 20.0),
    ]
}
