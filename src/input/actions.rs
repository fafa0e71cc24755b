//! Game action definitions

/// Every logical input the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,

    // Combat
    Fire,

    // System
    Quit,
}

impl Action {
    /// Display label (for logs and key help)
    pub fn label(&self) -> &'static str {
        match self {
            Action::MoveLeft => "Move Left",
            Action::MoveRight => "Move Right",
            Action::Fire => "Fire",
            Action::Quit => "Quit",
        }
    }
}
