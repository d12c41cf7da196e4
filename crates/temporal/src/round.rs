use std::cmp::Ordering;

/// Direction used when quantizing a position onto a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundMode {
    /// Round down only if not already on a grid line.
    DownMaybe,
    /// Always round down, even when already on a grid line.
    DownAlways,
    /// Round to the nearest grid line.
    Nearest,
    /// Always round up, even when already on a grid line.
    UpAlways,
    /// Round up only if not already on a grid line.
    UpMaybe,
}

impl RoundMode {
    /// How a rounded value may relate to its input: `Less` for the
    /// downward modes, `Greater` for the upward ones, `Equal` for nearest,
    /// which may go either way.
    pub fn direction(self) -> Ordering {
        match self {
            RoundMode::DownMaybe | RoundMode::DownAlways => Ordering::Less,
            RoundMode::Nearest => Ordering::Equal,
            RoundMode::UpAlways | RoundMode::UpMaybe => Ordering::Greater,
        }
    }

    /// Whether a value that already sits on a grid line is moved anyway.
    pub fn forces_move(self) -> bool {
        matches!(self, RoundMode::DownAlways | RoundMode::UpAlways)
    }
}
