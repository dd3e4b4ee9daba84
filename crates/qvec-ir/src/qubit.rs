//! Qubit and classical bit indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a program, in `[0, num_qubits)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit's bit in a basis-state index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a program, in `[0, num_clbits)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Position of this bit in a classical outcome.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(7)), "q7");
    }

    #[test]
    fn test_clbit_display() {
        assert_eq!(format!("{}", ClbitId(1)), "c1");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&QubitId(3)).unwrap();
        assert_eq!(json, "3");
        let back: ClbitId = serde_json::from_str("2").unwrap();
        assert_eq!(back, ClbitId(2));
    }
}
