//! Application types and state structures

/// Which part of the form receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Gallery,
    City,
    Country,
    Distance,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Gallery,
        Focus::City,
        Focus::Country,
        Focus::Distance,
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or(0)
    }

    /// Next element in tab order, wrapping around
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous element in tab order, wrapping around
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// Editing the form
    Form,
    /// Blocking notice; any key dismisses it
    Alert(String),
}
