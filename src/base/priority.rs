//! Symbol priority.

/// Ranking used to pick among competing matches and completion items.
///
/// Variants are ordered from lowest to highest. With `#[derive(Ord)]` this
/// means: Lowest < Low < Normal < High < Highest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 5] = [
        Priority::Lowest,
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Highest,
    ];

    /// Numeric weight, used when folding priority into a sort key.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Display label.
    pub fn display(self) -> &'static str {
        match self {
            Priority::Lowest => "lowest",
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Highest => "highest",
        }
    }
}
