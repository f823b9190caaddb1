//! The symbol subsystem.
//!
//! Symbols are leaf nodes carrying a one-byte name. Printable ASCII names
//! (32 and above) are ordinary user variables; control codes 1 through 29
//! are system symbols whose byte values are pinned for serialization
//! compatibility and can never collide with printable characters.

use thiserror::Error;

/// A one-byte symbol name.
///
/// The byte value partitions the namespace: reserved system codes live in
/// 1..=29, user variables in printable ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SymbolName(pub u8);

impl SymbolName {
    /// Returns the raw byte code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }
}

impl From<char> for SymbolName {
    fn from(c: char) -> Self {
        debug_assert!(c.is_ascii());
        Self(c as u8)
    }
}

impl From<SpecialSymbol> for SymbolName {
    fn from(s: SpecialSymbol) -> Self {
        Self(s as u8)
    }
}

/// System-defined symbols with pinned byte codes.
///
/// The discriminants reuse ASCII control codes 1..=31, which never appear
/// in user-entered names, so a single byte identifies either a user
/// variable or a system symbol. The exact values are part of the stored
/// expression format and must not change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum SpecialSymbol {
    /// The last computed result.
    Ans = 1,
    /// Sequence term u(n).
    Un = 2,
    /// Sequence term u(n+1).
    Un1 = 3,
    /// Sequence term u(n+2).
    Un2 = 4,
    /// Sequence term v(n).
    Vn = 5,
    /// Sequence term v(n+1).
    Vn1 = 6,
    /// Sequence term v(n+2).
    Vn2 = 7,
    /// Matrix slot 0.
    M0 = 8,
    /// Matrix slot 1.
    M1 = 9,
    /// Matrix slot 2.
    M2 = 10,
    /// Matrix slot 3.
    M3 = 11,
    /// Matrix slot 4.
    M4 = 12,
    /// Matrix slot 5.
    M5 = 13,
    /// Matrix slot 6.
    M6 = 14,
    /// Matrix slot 7.
    M7 = 15,
    /// Matrix slot 8.
    M8 = 16,
    /// Matrix slot 9.
    M9 = 17,
    /// Statistical series 1 values.
    V1 = 18,
    /// Statistical series 1 counts.
    N1 = 19,
    /// Statistical series 2 values.
    V2 = 20,
    /// Statistical series 2 counts.
    N2 = 21,
    /// Statistical series 3 values.
    V3 = 22,
    /// Statistical series 3 counts.
    N3 = 23,
    /// Regression series 1 x-coordinates.
    X1 = 24,
    /// Regression series 1 y-coordinates.
    Y1 = 25,
    /// Regression series 2 x-coordinates.
    X2 = 26,
    /// Regression series 2 y-coordinates.
    Y2 = 27,
    /// Regression series 3 x-coordinates.
    X3 = 28,
    /// Regression series 3 y-coordinates.
    Y3 = 29,
}

/// Error returned when a byte code is not a reserved system symbol.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("byte code {0} is not a reserved system symbol")]
pub struct InvalidSymbolCode(pub u8);

impl TryFrom<u8> for SpecialSymbol {
    type Error = InvalidSymbolCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Ans),
            2 => Ok(Self::Un),
            3 => Ok(Self::Un1),
            4 => Ok(Self::Un2),
            5 => Ok(Self::Vn),
            6 => Ok(Self::Vn1),
            7 => Ok(Self::Vn2),
            8 => Ok(Self::M0),
            9 => Ok(Self::M1),
            10 => Ok(Self::M2),
            11 => Ok(Self::M3),
            12 => Ok(Self::M4),
            13 => Ok(Self::M5),
            14 => Ok(Self::M6),
            15 => Ok(Self::M7),
            16 => Ok(Self::M8),
            17 => Ok(Self::M9),
            18 => Ok(Self::V1),
            19 => Ok(Self::N1),
            20 => Ok(Self::V2),
            21 => Ok(Self::N2),
            22 => Ok(Self::V3),
            23 => Ok(Self::N3),
            24 => Ok(Self::X1),
            25 => Ok(Self::Y1),
            26 => Ok(Self::X2),
            27 => Ok(Self::Y2),
            28 => Ok(Self::X3),
            29 => Ok(Self::Y3),
            other => Err(InvalidSymbolCode(other)),
        }
    }
}

/// Returns the matrix symbol for slot `index` (0..=9).
///
/// Inverse of the matrix-placeholder range of [`is_matrix_symbol`].
///
/// # Panics
///
/// Panics if `index` is not in 0..=9.
#[must_use]
pub fn matrix_symbol(index: u8) -> SpecialSymbol {
    assert!(index <= 9, "matrix slot index out of range: {index}");
    SpecialSymbol::try_from(SpecialSymbol::M0 as u8 + index).unwrap()
}

/// Returns true if `code` is one of the ten matrix-placeholder codes.
#[must_use]
pub fn is_matrix_symbol(code: u8) -> bool {
    (SpecialSymbol::M0 as u8..=SpecialSymbol::M9 as u8).contains(&code)
}

/// Returns true if `code` names a single scalar storage slot: an
/// uppercase register or the last-answer symbol.
#[must_use]
pub fn is_scalar_symbol(code: u8) -> bool {
    code == SpecialSymbol::Ans as u8 || code.is_ascii_uppercase()
}

/// Returns true if `code` is an ordinary user variable (lowercase ASCII
/// letter).
#[must_use]
pub fn is_variable_symbol(code: u8) -> bool {
    code.is_ascii_lowercase()
}

/// Returns true if `code` is a statistical series placeholder.
#[must_use]
pub fn is_series_symbol(code: u8) -> bool {
    (SpecialSymbol::V1 as u8..=SpecialSymbol::N3 as u8).contains(&code)
}

/// Returns true if `code` is a regression data placeholder.
#[must_use]
pub fn is_regression_symbol(code: u8) -> bool {
    (SpecialSymbol::X1 as u8..=SpecialSymbol::Y3 as u8).contains(&code)
}

/// Returns the fixed display token for a reserved code, or `None` for
/// codes outside the reserved range.
///
/// Tokens are pairwise distinct and part of the serialization format.
#[must_use]
pub fn text_for_special_symbols(name: SymbolName) -> Option<&'static str> {
    let special = SpecialSymbol::try_from(name.code()).ok()?;
    Some(match special {
        SpecialSymbol::Ans => "ans",
        SpecialSymbol::Un => "u(n)",
        SpecialSymbol::Un1 => "u(n+1)",
        SpecialSymbol::Un2 => "u(n+2)",
        SpecialSymbol::Vn => "v(n)",
        SpecialSymbol::Vn1 => "v(n+1)",
        SpecialSymbol::Vn2 => "v(n+2)",
        SpecialSymbol::M0 => "M0",
        SpecialSymbol::M1 => "M1",
        SpecialSymbol::M2 => "M2",
        SpecialSymbol::M3 => "M3",
        SpecialSymbol::M4 => "M4",
        SpecialSymbol::M5 => "M5",
        SpecialSymbol::M6 => "M6",
        SpecialSymbol::M7 => "M7",
        SpecialSymbol::M8 => "M8",
        SpecialSymbol::M9 => "M9",
        SpecialSymbol::V1 => "V1",
        SpecialSymbol::N1 => "N1",
        SpecialSymbol::V2 => "V2",
        SpecialSymbol::N2 => "N2",
        SpecialSymbol::V3 => "V3",
        SpecialSymbol::N3 => "N3",
        SpecialSymbol::X1 => "X1",
        SpecialSymbol::Y1 => "Y1",
        SpecialSymbol::X2 => "X2",
        SpecialSymbol::Y2 => "Y2",
        SpecialSymbol::X3 => "X3",
        SpecialSymbol::Y3 => "Y3",
    })
}
