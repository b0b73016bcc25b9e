use std::{error::Error, fmt, str::FromStr};

use wild_defense_core::{CellCoord, TowerKind};

const KIND_DELIMITER: char = '@';
const COORD_DELIMITER: char = ',';

/// Tower requested on the command line as `kind@column,row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) kind: TowerKind,
    pub(crate) cell: CellCoord,
}

impl Placement {
    const fn new(kind: TowerKind, column: u32, row: u32) -> Self {
        Self {
            kind,
            cell: CellCoord::new(column, row),
        }
    }

    /// Towers built when no placement was requested: one sniper beside the
    /// first bend and one scout covering the last straight.
    pub(crate) fn defaults() -> Vec<Self> {
        vec![
            Self::new(TowerKind::ChameleonSniper, 7, 5),
            Self::new(TowerKind::MeerkatScout, 9, 7),
        ]
    }
}

impl FromStr for Placement {
    type Err = PlacementParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (kind, coords) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or_else(|| PlacementParseError::MissingCell(trimmed.to_owned()))?;

        let kind = parse_kind(kind.trim())?;
        let (column, row) = coords
            .split_once(COORD_DELIMITER)
            .ok_or_else(|| PlacementParseError::InvalidCell(coords.to_owned()))?;
        let column = column
            .trim()
            .parse::<u32>()
            .map_err(|_| PlacementParseError::InvalidCell(coords.to_owned()))?;
        let row = row
            .trim()
            .parse::<u32>()
            .map_err(|_| PlacementParseError::InvalidCell(coords.to_owned()))?;

        Ok(Self::new(kind, column, row))
    }
}

fn parse_kind(value: &str) -> Result<TowerKind, PlacementParseError> {
    match value.to_ascii_lowercase().as_str() {
        "meerkat" | "scout" => Ok(TowerKind::MeerkatScout),
        "chameleon" | "sniper" => Ok(TowerKind::ChameleonSniper),
        _ => Err(PlacementParseError::UnknownKind(value.to_owned())),
    }
}

/// Errors raised while parsing `--place` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlacementParseError {
    /// The argument had no `@` separating the kind from the cell.
    MissingCell(String),
    /// The tower kind was not recognised.
    UnknownKind(String),
    /// The cell was not two unsigned integers separated by a comma.
    InvalidCell(String),
}

impl fmt::Display for PlacementParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCell(value) => {
                write!(f, "placement '{value}' must look like kind@column,row")
            }
            Self::UnknownKind(kind) => {
                write!(f, "tower kind '{kind}' is not one of meerkat, chameleon")
            }
            Self::InvalidCell(cell) => write!(f, "could not parse cell '{cell}'"),
        }
    }
}

impl Error for PlacementParseError {}
