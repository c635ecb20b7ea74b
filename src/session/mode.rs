use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InkError;
use crate::raster::CompositeMode;

/// How pointer input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Freehand strokes in the brush color
    #[default]
    Draw,
    /// Freehand strokes that clear to transparency
    Erase,
    /// A press bucket-fills the region under the pointer
    Flood,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Draw, Mode::Erase, Mode::Flood];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Draw => "draw",
            Mode::Erase => "erase",
            Mode::Flood => "flood",
        }
    }

    /// Pixel-combine rule used by strokes and fills in this mode
    pub fn composite(&self) -> CompositeMode {
        match self {
            Mode::Draw | Mode::Flood => CompositeMode::Normal,
            Mode::Erase => CompositeMode::Erase,
        }
    }

    /// Whether a press starts a freehand stroke
    pub fn is_stroke(&self) -> bool {
        matches!(self, Mode::Draw | Mode::Erase)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = InkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InkError::InvalidArgument(format!("unknown mode '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("draw".parse::<Mode>().unwrap(), Mode::Draw);
        assert_eq!("Erase".parse::<Mode>().unwrap(), Mode::Erase);
        assert_eq!(" FLOOD ".parse::<Mode>().unwrap(), Mode::Flood);
    }

    #[test]
    fn test_unknown_mode_is_invalid_argument() {
        assert!(matches!("spray".parse::<Mode>(), Err(InkError::InvalidArgument(_))));
    }

    #[test]
    fn test_composite_rule() {
        assert_eq!(Mode::Draw.composite(), CompositeMode::Normal);
        assert_eq!(Mode::Flood.composite(), CompositeMode::Normal);
        assert_eq!(Mode::Erase.composite(), CompositeMode::Erase);
    }
}
