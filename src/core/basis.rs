use std::fmt;

/// One of the two conjugate polarization bases used by BB84.
///
/// - `Rectilinear` (`+`): horizontal/vertical polarization, the Z basis.
/// - `Diagonal` (`x`): ±45° polarization, the X (Hadamard) basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    Rectilinear,
    Diagonal,
}

impl Basis {
    /// Both bases, in a fixed order.
    pub const ALL: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];

    /// Short symbol used in reports.
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

/// Maps a fair coin onto a basis: `false` -> rectilinear, `true` -> diagonal.
impl From<bool> for Basis {
    fn from(coin: bool) -> Self {
        if coin {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
