//! RGB color values parsed from `"r,g,b"` strings.
//!
//! The simulator's visual settings describe colors as three float
//! components in `[0.0, 1.0]`, both in the config file and on the command
//! line. For terminal rendering they are mapped onto the xterm-256 color
//! cube.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// An RGB color with each component in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a color, rejecting components outside `[0.0, 1.0]`.
    pub fn new(r: f64, g: f64, b: f64) -> SimResult<Self> {
        for (name, value) in [("r", r), ("g", g), ("b", b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::parse(format!(
                    "RGB component '{name}' must be in [0.0, 1.0], got {value}"
                )));
            }
        }
        Ok(Self { r, g, b })
    }

    /// Index into the 6x6x6 xterm-256 color cube (entries 16..=231).
    pub fn to_ansi256(self) -> u8 {
        let level = |c: f64| (c * 5.0).round() as u8;
        16 + 36 * level(self.r) + 6 * level(self.g) + level(self.b)
    }
}

impl FromStr for Rgb {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(SimError::parse(format!(
                "expected three R,G,B components, got '{s}'"
            )));
        }
        let mut components = [0.0; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|e| SimError::parse(format!("invalid RGB component '{part}': {e}")))?;
        }
        Rgb::new(components[0], components[1], components[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SimError;

    fn try_from(s: String) -> SimResult<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
