use crate::util::num::round_half_up;

/// The numeric element type carried by every scalar and matrix.
///
/// The tag decides how values are stored (an `Integer` is always rounded to
/// the nearest whole number) and how they are rendered (`Integer` values print
/// without a decimal point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Whole numbers, written `entero` in source code.
    Integer,
    /// Floating-point numbers, written `flotante` in source code.
    Float,
}

impl ElementType {
    /// Brings a raw value into the storage form required by this type.
    ///
    /// `Integer` rounds to the nearest whole number, `Float` leaves the value
    /// untouched.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::Integer => round_half_up(value),
            Self::Float => value,
        }
    }

    /// The keyword used for this type in source code.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "entero",
            Self::Float => "flotante",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "Integer"),
            Self::Float => write!(f, "Float"),
        }
    }
}

/// Combines two element types into the type of an operation's result.
///
/// Equal types stay as they are and a mix of `Integer` and `Float` promotes to
/// `Float`. `None` means the two types cannot be combined; every binary
/// operator checks this before touching any data.
///
/// # Example
/// ```
/// use matcalc::interpreter::value::element_type::{ElementType, promote};
///
/// assert_eq!(promote(ElementType::Integer, ElementType::Integer),
///            Some(ElementType::Integer));
/// assert_eq!(promote(ElementType::Integer, ElementType::Float),
///            Some(ElementType::Float));
/// assert_eq!(promote(ElementType::Float, ElementType::Integer),
///            Some(ElementType::Float));
/// ```
#[must_use]
pub fn promote(left: ElementType, right: ElementType) -> Option<ElementType> {
    use ElementType::{Float, Integer};

    match (left, right) {
        (Integer, Integer) => Some(Integer),
        (Float, Float) => Some(Float),
        (Integer, Float) | (Float, Integer) => Some(Float),
    }
}
