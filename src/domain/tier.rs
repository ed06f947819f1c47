use std::fmt;

/// Concentric band of the chart a risk value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Disc sector from the site out to the inner radius (`R1`)
    Inner,
    /// Annulus sector between the inner and outer radius (`R2`)
    Outer,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Inner, Tier::Outer];

    /// Classify the number following `_R` in an Area value
    pub fn from_number(number: &str) -> Option<Tier> {
        match number {
            "1" => Some(Tier::Inner),
            "2" => Some(Tier::Outer),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Tier::Inner => 1,
            Tier::Outer => 2,
        }
    }

    /// Area label for a direction in this tier, e.g. `N_R1`
    pub fn area_label(self, direction: &str) -> String {
        format!("{}_R{}", direction, self.number())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Inner => write!(f, "inner"),
            Tier::Outer => write!(f, "outer"),
        }
    }
}
