//! Nucleic acid structure drawing: the document edited through the history.
//!
//! A drawing is a list of bases (each with a unique id and a position) plus the
//! secondary bonds pairing them. Primary bonds are implied between consecutive
//! bases. Snapshots are plain copies of both lists ([`DrawingState`]).
//!
//! ## Module Structure
//!
//! - [`dot_bracket`] - Dot-bracket notation parsing

pub mod dot_bracket;


use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::BoundingBox;
use crate::constants::BASE_SPACING;
use crate::document::{Document, DocumentError};

pub use dot_bracket::{DotBracketError, parse_pairs};

/// A single nucleobase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    pub character: char,
    pub x: f64,
    pub y: f64,
}

/// A base pair, referencing both bases by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryBond {
    pub base_id1: String,
    pub base_id2: String,
}

/// Serialized form of a [`Drawing`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingState {
    pub bases: Vec<Base>,
    #[serde(default)]
    pub secondary_bonds: Vec<SecondaryBond>,
}

impl DrawingState {
    /// Check everything [`Drawing::restore`] requires of a snapshot
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut ids = HashSet::with_capacity(self.bases.len());
        for base in &self.bases {
            check_id(&mut ids, &base.id)?;
            if !base.x.is_finite() || !base.y.is_finite() {
                return Err(DocumentError::NonFiniteCoordinates(base.id.clone()));
            }
        }

        let mut paired = HashSet::new();
        for bond in &self.secondary_bonds {
            for id in [&bond.base_id1, &bond.base_id2] {
                if !ids.contains(id.as_str()) {
                    return Err(DocumentError::UnknownId(id.clone()));
                }
            }
            if bond.base_id1 == bond.base_id2 {
                return Err(DocumentError::SelfPair(bond.base_id1.clone()));
            }
            for id in [&bond.base_id1, &bond.base_id2] {
                if !paired.insert(id.as_str()) {
                    return Err(DocumentError::AlreadyPaired(id.clone()));
                }
            }
        }

        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bases.iter().any(|base| base.id == id)
    }
}

fn check_id<'a>(seen: &mut HashSet<&'a str>, id: &'a str) -> Result<(), DocumentError> {
    if id.is_empty() {
        return Err(DocumentError::EmptyId);
    }
    if !seen.insert(id) {
        return Err(DocumentError::DuplicateId(id.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct Drawing {
    bases: Vec<Base>,
    secondary_bonds: Vec<SecondaryBond>,
    /// Counter for generated base ids, never reset so ids are not reused
    next_id: u64,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn secondary_bonds(&self) -> &[SecondaryBond] {
        &self.secondary_bonds
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.base(id).is_some()
    }

    pub fn base(&self, id: &str) -> Option<&Base> {
        self.bases.iter().find(|base| base.id == id)
    }

    /// Direct access to a base. Changing its id to one already in use makes
    /// the drawing unserializable until fixed.
    pub fn base_mut(&mut self, id: &str) -> Option<&mut Base> {
        self.bases.iter_mut().find(|base| base.id == id)
    }

    /// Characters of all bases, in order
    pub fn sequence(&self) -> String {
        self.bases.iter().map(|base| base.character).collect()
    }

    /// Id of the base paired with `id`, if any
    pub fn partner_of(&self, id: &str) -> Option<&str> {
        self.secondary_bonds.iter().find_map(|bond| {
            if bond.base_id1 == id {
                Some(bond.base_id2.as_str())
            } else if bond.base_id2 == id {
                Some(bond.base_id1.as_str())
            } else {
                None
            }
        })
    }

    /// Append a base at the given position and return its generated id
    pub fn append_base(&mut self, character: char, x: f64, y: f64) -> String {
        let id = self.generate_id();
        self.bases.push(Base {
            id: id.clone(),
            character,
            x,
            y,
        });
        id
    }

    /// Remove a base along with any secondary bond it takes part in
    pub fn remove_base(&mut self, id: &str) -> Option<Base> {
        let index = self.bases.iter().position(|base| base.id == id)?;
        self.secondary_bonds
            .retain(|bond| bond.base_id1 != id && bond.base_id2 != id);
        Some(self.bases.remove(index))
    }

    /// Pair two existing, currently unpaired bases
    pub fn add_secondary_bond(&mut self, base_id1: &str, base_id2: &str) -> Result<(), DocumentError> {
        for id in [base_id1, base_id2] {
            if !self.contains(id) {
                return Err(DocumentError::UnknownId(id.to_string()));
            }
            if self.partner_of(id).is_some() {
                return Err(DocumentError::AlreadyPaired(id.to_string()));
            }
        }
        if base_id1 == base_id2 {
            return Err(DocumentError::SelfPair(base_id1.to_string()));
        }

        self.secondary_bonds.push(SecondaryBond {
            base_id1: base_id1.to_string(),
            base_id2: base_id2.to_string(),
        });
        Ok(())
    }

    /// Move the given bases by (`dx`, `dy`). Returns how many were moved.
    pub fn shift<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>, dx: f64, dy: f64) -> usize {
        let ids: HashSet<&str> = ids.into_iter().collect();
        let mut moved = 0;
        for base in self.bases.iter_mut().filter(|base| ids.contains(base.id.as_str())) {
            base.x += dx;
            base.y += dy;
            moved += 1;
        }
        moved
    }

    /// Draw a structure given as a sequence and its dot-bracket notation.
    ///
    /// One base is appended per character of `sequence` (laid out on a straight
    /// line after any existing bases) and one secondary bond per bracket pair.
    /// Nothing is added if the notation is invalid. Returns the new base ids.
    pub fn draw_dot_bracket(
        &mut self,
        sequence: &str,
        dot_bracket: &str,
    ) -> Result<Vec<String>, DotBracketError> {
        let sequence_len = sequence.chars().count();
        let structure_len = dot_bracket.chars().count();
        if sequence_len != structure_len {
            return Err(DotBracketError::LengthMismatch {
                sequence: sequence_len,
                structure: structure_len,
            });
        }
        let pairs = parse_pairs(dot_bracket)?;

        let offset = self.bases.len();
        let ids: Vec<String> = sequence
            .chars()
            .enumerate()
            .map(|(i, character)| {
                let x = (offset + i) as f64 * BASE_SPACING;
                self.append_base(character, x, 0.0)
            })
            .collect();

        self.secondary_bonds
            .extend(pairs.into_iter().map(|(i, j)| SecondaryBond {
                base_id1: ids[i].clone(),
                base_id2: ids[j].clone(),
            }));

        debug!(
            "Drew {} bases from dot-bracket notation ({} total)",
            ids.len(),
            self.bases.len()
        );
        Ok(ids)
    }

    /// Smallest box containing the centers of all bases
    pub fn content_bbox(&self) -> Option<BoundingBox> {
        let first = self.bases.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for base in &self.bases[1..] {
            min_x = min_x.min(base.x);
            min_y = min_y.min(base.y);
            max_x = max_x.max(base.x);
            max_y = max_y.max(base.y);
        }
        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// Replace the contents with an already validated snapshot
    pub(crate) fn apply(&mut self, state: &DrawingState) {
        self.bases = state.bases.clone();
        self.secondary_bonds = state.secondary_bonds.clone();
    }

    fn generate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("b{}", self.next_id);
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl Document for Drawing {
    type State = DrawingState;

    /// Fails on any content `restore` would reject, so every snapshot taken
    /// here can be restored later
    fn serialize(&self) -> Result<DrawingState, DocumentError> {
        let state = DrawingState {
            bases: self.bases.clone(),
            secondary_bonds: self.secondary_bonds.clone(),
        };
        state.validate()?;
        Ok(state)
    }

    fn restore(&mut self, state: &DrawingState) -> Result<(), DocumentError> {
        state.validate()?;
        self.apply(state);
        Ok(())
    }
}
