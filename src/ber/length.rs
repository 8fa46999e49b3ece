use crate::error::BerError;

/// Ber Object Length
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Length {
    /// Definite form (X.690 8.1.3.3)
    Definite(usize),
    /// Indefinite form (X.690 8.1.3.6)
    Indefinite,
}

impl Length {
    /// Return true if length is definite and equal to 0
    pub fn is_null(&self) -> bool {
        *self == Length::Definite(0)
    }

    /// Return true if length uses the indefinite form
    pub fn is_indefinite(&self) -> bool {
        *self == Length::Indefinite
    }

    /// Get length of primitive object
    #[inline]
    pub fn definite(&self) -> Result<usize, BerError> {
        match self {
            Length::Definite(sz) => Ok(*sz),
            Length::Indefinite => Err(BerError::IndefiniteLengthUnexpected),
        }
    }
}

impl From<usize> for Length {
    fn from(v: usize) -> Self {
        Length::Definite(v)
    }
}
