//! Cart line quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be a positive integer")]
    NotPositive,
    /// The value does not fit the stored integer column.
    #[error("quantity is too large")]
    Overflow,
}

/// A strictly positive number of units of one plant in a cart.
///
/// Repeated adds of the same plant accumulate with [`Quantity::checked_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Create a quantity from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for zero or negative values and
    /// [`QuantityError::Overflow`] for values beyond `i32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 {
            return Err(QuantityError::NotPositive);
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::Overflow)
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Add two quantities, failing instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the sum exceeds `i32::MAX`.
    pub fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(QuantityError::Overflow)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Quantity {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Quantity {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(i64::from(raw))?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Quantity {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::new(-3), Err(QuantityError::NotPositive));
    }

    #[test]
    fn test_new_rejects_values_beyond_column() {
        assert_eq!(
            Quantity::new(i64::from(i32::MAX) + 1),
            Err(QuantityError::Overflow)
        );
    }

    #[test]
    fn test_checked_add_accumulates() {
        let total = Quantity::new(2).unwrap().checked_add(Quantity::new(3).unwrap());
        assert_eq!(total.unwrap().get(), 5);
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Quantity::new(i64::from(i32::MAX)).unwrap();
        assert_eq!(
            max.checked_add(Quantity::new(1).unwrap()),
            Err(QuantityError::Overflow)
        );
    }

    #[test]
    fn test_serde() {
        let quantity: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "4");
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
