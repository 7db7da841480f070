// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

/// A fixed-point decimal value with 18 fractional digits, stored as a signed 128-bit integer
/// of atomic units.
///
/// The signed representation lets contracts keep the result in the same type as token amounts
/// (`i128`) without casting back and forth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(i128);

impl Decimal {
    const DECIMAL_FRACTIONAL: i128 = 1_000_000_000_000_000_000i128; // 1*10**18
    /// The number of decimal places. Since decimal types are fixed-point rather than
    /// floating-point, this is a constant.
    pub const DECIMAL_PLACES: u32 = 18;

    pub const fn raw(value: i128) -> Self {
        Self(value)
    }

    /// Create a 1.0 Decimal
    #[inline]
    pub const fn one() -> Self {
        Self(Self::DECIMAL_FRACTIONAL)
    }

    /// Convert basis points (x/10000) into Decimal
    pub fn bps(x: i64) -> Self {
        Self((x as i128) * 100_000_000_000_000)
    }

    /// Returns the ratio (numerator / denominator) as a Decimal.
    ///
    /// Panics when the denominator is zero or the numerator is too large to be scaled.
    pub fn from_ratio(numerator: impl Into<i128>, denominator: impl Into<i128>) -> Self {
        match Self::checked_from_ratio(numerator, denominator) {
            Some(decimal) => decimal,
            None => panic!("Decimal: from_ratio: denominator is zero or numerator overflows"),
        }
    }

    /// Returns the ratio (numerator / denominator) as a Decimal, or `None` when the
    /// denominator is zero or the scaled numerator does not fit into 128 bits.
    pub fn checked_from_ratio(
        numerator: impl Into<i128>,
        denominator: impl Into<i128>,
    ) -> Option<Self> {
        let numerator: i128 = numerator.into();
        let denominator: i128 = denominator.into();
        if denominator == 0 {
            return None;
        }

        numerator
            .checked_mul(Self::DECIMAL_FRACTIONAL)?
            .checked_div(denominator)
            .map(Decimal)
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0i128
    }

    /// A decimal is an integer of atomic units plus a number that specifies the
    /// position of the decimal dot. So any decimal can be expressed as two numbers.
    ///
    /// ## Examples
    ///
    /// ```
    /// use soroban_decimal::Decimal;
    /// // Value with whole and fractional part
    /// let a = Decimal::bps(12_300);
    /// assert_eq!(a.atomics(), 1230000000000000000);
    ///
    /// // Smallest possible value
    /// let b = Decimal::raw(1);
    /// assert_eq!(b.atomics(), 1);
    /// ```
    #[must_use]
    #[inline]
    pub const fn atomics(&self) -> i128 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Decimal)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Decimal)
    }

    /// Multiplies an integer by this decimal, rounding towards zero.
    ///
    /// The whole and fractional parts are multiplied separately, so `rhs * self` only
    /// overflows when the final result does not fit into an `i128`.
    pub fn checked_mul_int(self, rhs: i128) -> Option<i128> {
        if rhs == 0 || self.is_zero() {
            return Some(0);
        }
        let whole = self.0 / Self::DECIMAL_FRACTIONAL;
        let fractional = self.0 % Self::DECIMAL_FRACTIONAL;

        rhs.checked_mul(whole)?
            .checked_add(rhs.checked_mul(fractional)? / Self::DECIMAL_FRACTIONAL)
    }
}
