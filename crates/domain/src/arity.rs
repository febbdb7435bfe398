//! Arity and slot indices.
//!
//! A *variant* of a family carries `i` argument slots, numbered `1..=i`.
//! Every name a fragment derives for slot `j` comes from a [`SlotIndex`], so
//! two fragments that agree on the index agree on the name.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Number of argument slots carried by one generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArityIndex(u32);

impl ArityIndex {
    /// Creates an arity index.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArity`] for zero.
    pub const fn new(value: u32) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::InvalidArity(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw arity.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the slots of this variant, `1..=arity`.
    #[must_use]
    pub const fn slots(self) -> SlotRange {
        SlotRange {
            start: 1,
            end: self.0,
        }
    }

    /// Returns true for the single-slot variant.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for ArityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of one argument slot within a variant, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u32);

impl SlotIndex {
    /// Creates a slot index.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSlotRange`] for zero.
    pub const fn new(value: u32) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::InvalidSlotRange { start: 0, end: 0 });
        }
        Ok(Self(value))
    }

    /// Returns the one-based slot number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the zero-based position of the slot.
    #[must_use]
    pub const fn offset(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty inclusive range of slots `[start, end]` with `1 <= start <= end`.
///
/// Holding a `SlotRange` is proof that the expander's precondition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRange {
    start: u32,
    end: u32,
}

impl SlotRange {
    /// Creates a slot range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSlotRange`] when `start` is zero or
    /// greater than `end`.
    pub const fn new(start: u32, end: u32) -> DomainResult<Self> {
        if start == 0 || start > end {
            return Err(DomainError::InvalidSlotRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First slot of the range.
    #[must_use]
    pub const fn start(&self) -> SlotIndex {
        SlotIndex(self.start)
    }

    /// Last slot of the range.
    #[must_use]
    pub const fn end(&self) -> SlotIndex {
        SlotIndex(self.end)
    }

    /// Number of slots in the range. Never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always false; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the slots in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = SlotIndex> + use<> {
        (self.start..=self.end).map(SlotIndex)
    }
}

impl IntoIterator for SlotRange {
    type Item = SlotIndex;
    type IntoIter = std::iter::Map<std::ops::RangeInclusive<u32>, fn(u32) -> SlotIndex>;

    fn into_iter(self) -> Self::IntoIter {
        (self.start..=self.end).map(SlotIndex as fn(u32) -> SlotIndex)
    }
}

/// Configured upper bound on the arity of a family, in `1..=MaxArity::LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxArity(u32);

impl MaxArity {
    /// Largest accepted bound.
    ///
    /// `EqnHolder` text grows with the cube of the bound, since several of
    /// its facets repeat every slot inside every slot. At this limit the
    /// largest artifact is a few megabytes.
    pub const LIMIT: u32 = 64;

    /// Validates a configured maximum arity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidMaxArity`] unless `1 <= value <= LIMIT`.
    pub fn new(value: i64) -> DomainResult<Self> {
        match u32::try_from(value) {
            Ok(v) if (1..=Self::LIMIT).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::InvalidMaxArity(value)),
        }
    }

    /// Returns the raw bound.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MaxArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
