//! Labeled endgame records

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, CELL_COUNT, Cell};

/// Number of comma-separated fields in one record: nine cells and a label
pub const FIELD_COUNT: usize = CELL_COUNT + 1;

/// Historical outcome attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => f.write_str("positive"),
            Label::Negative => f.write_str("negative"),
        }
    }
}

impl FromStr for Label {
    type Err = crate::Error;

    /// Parse a bare label. Errors carry line 0; [`GameRecord::from_fields`]
    /// fills in the real line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            _ => Err(crate::Error::UnknownLabel {
                line: 0,
                label: s.to_string(),
            }),
        }
    }
}

/// One dataset row: a 9-cell feature vector and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    features: [Cell; CELL_COUNT],
    label: Label,
}

impl GameRecord {
    pub fn new(features: [Cell; CELL_COUNT], label: Label) -> Self {
        Self { features, label }
    }

    /// Build a record from its fields.
    ///
    /// Cell fields are decoded leniently (`x`, `o`, anything else empty);
    /// the label must be `positive` or `negative`.
    ///
    /// # Errors
    ///
    /// `MalformedRecord` on a field count other than 10, `UnknownLabel` on
    /// any other label value.
    pub fn from_fields(fields: &[&str], line: u64) -> crate::Result<Self> {
        if fields.len() != FIELD_COUNT {
            return Err(crate::Error::MalformedRecord {
                line,
                reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            });
        }

        let label = fields[CELL_COUNT].parse::<Label>().map_err(|err| match err {
            crate::Error::UnknownLabel { label, .. } => crate::Error::UnknownLabel { line, label },
            other => other,
        })?;
        let board = Board::from_features(fields[..CELL_COUNT].iter().copied());

        Ok(Self {
            features: *board.cells(),
            label,
        })
    }

    /// Parse one comma-separated line such as `x,x,x,x,o,o,x,o,o,positive`
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::dataset::{GameRecord, Label};
    ///
    /// let record = GameRecord::parse_line("x,x,x,x,o,o,x,o,o,positive", 1).unwrap();
    /// assert_eq!(record.label(), Label::Positive);
    /// assert_eq!(record.board().encode(), "XXXXOOXOO");
    /// ```
    pub fn parse_line(text: &str, line: u64) -> crate::Result<Self> {
        let fields: Vec<&str> = text.trim_end_matches(['\r', '\n']).split(',').collect();
        Self::from_fields(&fields, line)
    }

    pub fn features(&self) -> &[Cell; CELL_COUNT] {
        &self.features
    }

    pub fn label(&self) -> Label {
        self.label
    }

    /// A fresh board holding the record's cells
    pub fn board(&self) -> Board {
        Board::from_cells(self.features)
    }
}
