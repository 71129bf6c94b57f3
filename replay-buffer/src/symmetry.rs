/// A spatial transform applied to observations when augmenting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// Reverses the height axis.
    Horizontal,
    /// Reverses the width axis.
    Vertical,
    /// Reverses both spatial axes.
    Diagonal,
}

/// Which symmetries to exploit, in `[horizontal, vertical, diagonal]` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symmetries {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl Symmetries {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.enabled().count()
    }

    /// Number of copies of every sample in an augmented batch, including the original.
    pub fn orientations(&self) -> usize {
        self.count() + 1
    }

    pub fn enabled(&self) -> impl Iterator<Item = Symmetry> {
        [
            (self.horizontal, Symmetry::Horizontal),
            (self.vertical, Symmetry::Vertical),
            (self.diagonal, Symmetry::Diagonal),
        ]
        .into_iter()
        .filter_map(|(enabled, symmetry)| enabled.then_some(symmetry))
    }
}

impl From<[bool; 3]> for Symmetries {
    fn from([horizontal, vertical, diagonal]: [bool; 3]) -> Self {
        Self {
            horizontal,
            vertical,
            diagonal,
        }
    }
}
