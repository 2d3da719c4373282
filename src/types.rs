//! Domain-specific newtypes for type safety.
//!
//! Play counts and listening durations are both plain integers in the export
//! files; wrapping them keeps aggregation code from summing one into the other.

use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;

use derive_more::{Add as DeriveAdd, From, Into};

/// Milliseconds per minute.
const MS_PER_MINUTE: f64 = 60_000.0;

/// Milliseconds per hour.
const MS_PER_HOUR: f64 = 3_600_000.0;

// ============================================================================
// Macros for reducing boilerplate
// ============================================================================

/// Generates common methods and accumulation traits for numeric newtypes.
macro_rules! impl_newtype_common {
    ($type:ty) => {
        impl $type {
            /// Create a new instance.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Check if the value is zero.
            #[must_use]
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }

        impl AddAssign for $type {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::default(), |acc, x| acc + x)
            }
        }

        impl<'a> Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.copied().sum()
            }
        }
    };
}

// ============================================================================
// PlayCount
// ============================================================================

/// A number of play events.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, DeriveAdd, From, Into,
)]
pub struct PlayCount(pub i64);

impl_newtype_common!(PlayCount);

impl PlayCount {
    /// Count the items of a collection.
    #[must_use]
    pub fn of_len(len: usize) -> Self {
        Self(i64::try_from(len).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for PlayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Milliseconds
// ============================================================================

/// A duration in milliseconds.
///
/// Used for `ms_played` on each event and every sum derived from it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, DeriveAdd, From, Into,
)]
pub struct Milliseconds(pub i64);

impl_newtype_common!(Milliseconds);

impl Milliseconds {
    /// Convert to minutes as a floating point value.
    #[must_use]
    pub fn as_minutes_f64(self) -> f64 {
        self.0 as f64 / MS_PER_MINUTE
    }

    /// Convert to hours as a floating point value.
    #[must_use]
    pub fn as_hours_f64(self) -> f64 {
        self.0 as f64 / MS_PER_HOUR
    }
}

// ============================================================================
// Tests
// ============================================================================
