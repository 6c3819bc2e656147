//! Named bundles of lines.
//!
//! An indicator produces a [`Lines`] bundle: a fixed, ordered set of
//! member names declared up front, filled in as the indicator computes
//! them. The bundle keeps the per-member minperiods and their maximum as
//! plain fields, refreshed on every assignment.
//!
//! # Example
//!
//! ```
//! use ta_lines::line::Line;
//! use ta_lines::lines::Lines;
//!
//! let close = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
//!
//! let mut bands = Lines::new(["mid", "top"]).unwrap();
//! let mid = close.rolling(3).unwrap().mean().unwrap();
//! let top = mid.add(1.0).unwrap();
//! bands.set("mid", mid).unwrap();
//! bands.set("top", top).unwrap();
//!
//! assert_eq!(bands.minperiod(), 3);
//! assert_eq!(bands.get("top").unwrap().valid()[0], 3.0);
//! assert_eq!(bands.get_at(0).unwrap().name(), Some("mid"));
//! ```

use crate::error::{Error, Result};
use crate::line::Line;
use crate::minperiod;
use crate::traits::SeriesElement;

/// An ordered, fixed set of named lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Lines<T> {
    names: Vec<String>,
    members: Vec<Option<Line<T>>>,
    minperiods: Vec<usize>,
    minperiod: usize,
}

impl<T: SeriesElement> Lines<T> {
    /// Declares a bundle with the given member names, all unassigned.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateLine` if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if declared.contains(&name) {
                return Err(Error::DuplicateLine { name });
            }
            declared.push(name);
        }
        let len = declared.len();
        Ok(Self {
            names: declared,
            members: vec![None; len],
            minperiods: vec![1; len],
            minperiod: 1,
        })
    }

    /// Declares and fills a bundle in one go.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateLine` if a name appears twice.
    pub fn from_lines<S: Into<String>>(lines: Vec<(S, Line<T>)>) -> Result<Self> {
        let (names, members): (Vec<String>, Vec<Line<T>>) =
            lines.into_iter().map(|(name, line)| (name.into(), line)).unzip();
        let mut bundle = Self::new(names)?;
        bundle.set_positional(members)?;
        Ok(bundle)
    }

    /// Assigns members in declaration order, starting at position 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::LineIndexOutOfRange` if more lines are given than
    /// names were declared.
    pub fn set_positional(&mut self, lines: impl IntoIterator<Item = Line<T>>) -> Result<()> {
        for (position, line) in lines.into_iter().enumerate() {
            self.set_at(position, line)?;
        }
        Ok(())
    }

    /// Assigns a member by name. The line takes the member's name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLine` if `name` was not declared.
    pub fn set(&mut self, name: &str, line: Line<T>) -> Result<()> {
        let position = self.position(name)?;
        self.set_at(position, line)
    }

    /// Assigns a member by position. The line takes the member's name.
    ///
    /// # Errors
    ///
    /// Returns `Error::LineIndexOutOfRange` past the last declared member.
    pub fn set_at(&mut self, position: usize, mut line: Line<T>) -> Result<()> {
        let len = self.names.len();
        let name = self
            .names
            .get(position)
            .ok_or(Error::LineIndexOutOfRange { position, len })?;
        line.set_name(name);
        self.minperiods[position] = line.minperiod();
        self.members[position] = Some(line);
        self.minperiod = minperiod::aggregate(self.minperiods.iter().copied());
        Ok(())
    }

    /// Reads a member by name.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownLine` if `name` was not declared
    /// - `Error::UnassignedLine` if it has not been assigned yet
    pub fn get(&self, name: &str) -> Result<&Line<T>> {
        let position = self.position(name)?;
        self.get_at(position)
    }

    /// Reads a member by position.
    ///
    /// # Errors
    ///
    /// - `Error::LineIndexOutOfRange` past the last declared member
    /// - `Error::UnassignedLine` if it has not been assigned yet
    pub fn get_at(&self, position: usize) -> Result<&Line<T>> {
        let len = self.names.len();
        let name = self
            .names
            .get(position)
            .ok_or(Error::LineIndexOutOfRange { position, len })?;
        self.members[position]
            .as_ref()
            .ok_or_else(|| Error::UnassignedLine { name: name.clone() })
    }

    /// Reads a member by name, `None` if undeclared or unassigned.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Line<T>> {
        self.position(name).ok().and_then(|position| self.members[position].as_ref())
    }

    /// Position of a declared member.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLine` if `name` was not declared.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|declared| declared == name)
            .ok_or_else(|| Error::UnknownLine {
                name: name.to_string(),
            })
    }

    /// Returns true if `name` was declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|declared| declared == name)
    }

    /// Declared member names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of declared members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no members were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true once every declared member is assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.members.iter().all(Option::is_some)
    }

    /// Iterates over assigned members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Line<T>> + '_ {
        self.members.iter().flatten()
    }

    /// Iterates over `(name, line)` pairs of assigned members.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Line<T>)> + '_ {
        self.names
            .iter()
            .zip(&self.members)
            .filter_map(|(name, member)| member.as_ref().map(|line| (name.as_str(), line)))
    }

    /// Largest member minperiod; unassigned members count as 1.
    #[inline]
    #[must_use]
    pub const fn minperiod(&self) -> usize {
        self.minperiod
    }

    /// Per-member minperiods in declaration order.
    #[must_use]
    pub fn minperiods(&self) -> &[usize] {
        &self.minperiods
    }

    /// Length of the first assigned member, 0 if none is assigned.
    #[must_use]
    pub fn size(&self) -> usize {
        self.iter().next().map_or(0, Line::len)
    }

    /// Consumes the bundle and returns the members in declaration order.
    #[must_use]
    pub fn into_lines(self) -> Vec<Option<Line<T>>> {
        self.members
    }
}

impl<'a, T: SeriesElement> IntoIterator for &'a Lines<T> {
    type Item = &'a Line<T>;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Line<T>>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().flatten()
    }
}
