use anyhow::bail;
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// Side/player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn all() -> [Side; 2] {
        [Side::Black, Side::White]
    }

    pub fn opponent(self) -> Self {
        !self
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" | "b" => Ok(Side::Black),
            "white" | "w" => Ok(Side::White),
            _ => bail!("Unknown side: {}", s),
        }
    }
}
