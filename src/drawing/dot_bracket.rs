//! Dot-bracket notation parsing.
//!
//! Only the simple form is understood: `.` for an unpaired base and
//! matching `(` / `)` for a base pair.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotBracketError {
    #[error("sequence has {sequence} characters but the structure has {structure}")]
    LengthMismatch { sequence: usize, structure: usize },
    #[error("unexpected character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("closing bracket at position {0} has no partner")]
    UnmatchedClose(usize),
    #[error("opening bracket at position {0} has no partner")]
    UnmatchedOpen(usize),
}

/// Base pairs expressed by `dot_bracket`, as zero-based position pairs
/// ordered by closing position.
pub fn parse_pairs(dot_bracket: &str) -> Result<Vec<(usize, usize)>, DotBracketError> {
    let mut open = Vec::new();
    let mut pairs = Vec::new();

    for (position, character) in dot_bracket.chars().enumerate() {
        match character {
            '.' => {}
            '(' => open.push(position),
            ')' => {
                let partner = open.pop().ok_or(DotBracketError::UnmatchedClose(position))?;
                pairs.push((partner, position));
            }
            _ => {
                return Err(DotBracketError::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
    }

    if let Some(&position) = open.first() {
        return Err(DotBracketError::UnmatchedOpen(position));
    }

    Ok(pairs)
}
