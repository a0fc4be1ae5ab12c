use std::fmt;

use num::{BigInt, BigRational, Signed, ToPrimitive, Zero};

/// Literal constants appearing in terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(BigInt),
    /// Exact rational; rendered as its floating approximation.
    Rational(BigRational),
    String(String),
    Char(char),
}

impl Literal {
    pub fn int(value: i64) -> Self {
        Literal::Integer(BigInt::from(value))
    }

    /// Build an exact rational `numer / denom`, or `None` for a zero denominator.
    pub fn ratio(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Literal::Rational(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }

    pub fn string(value: &str) -> Self {
        Literal::String(value.to_string())
    }

    /// True for numbers below zero, whose rendering starts with `-`.
    pub fn is_negative(&self) -> bool {
        match self {
            Literal::Integer(n) => n.is_negative(),
            Literal::Rational(r) => r.is_negative(),
            Literal::String(_) | Literal::Char(_) => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Rational(r) => match r.to_f64() {
                Some(approx) if approx.is_finite() && approx.fract().is_zero() => {
                    write!(f, "{:.1}", approx)
                }
                Some(approx) => write!(f, "{}", approx),
                None => write!(f, "{}/{}", r.numer(), r.denom()),
            },
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Char(c) => write!(f, "{:?}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_renders_as_approximation() {
        assert_eq!(Literal::ratio(1, 2).unwrap().to_string(), "0.5");
        assert_eq!(Literal::ratio(6, 2).unwrap().to_string(), "3.0");
        assert_eq!(
            Literal::ratio(1, 3).unwrap().to_string(),
            (1.0f64 / 3.0).to_string()
        );
    }

    #[test]
    fn test_rational_keeps_exact_value() {
        // 1/3 and 2/6 display identically and compare equal; 1/3 and 0.333.. do not.
        assert_eq!(Literal::ratio(1, 3), Literal::ratio(2, 6));
        assert_ne!(Literal::ratio(1, 3), Literal::ratio(333, 1000));
    }

    #[test]
    fn test_negative_numbers() {
        assert!(Literal::int(-3).is_negative());
        assert!(Literal::ratio(1, -2).unwrap().is_negative());
        assert!(!Literal::int(0).is_negative());
        assert!(!Literal::string("-1").is_negative());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Literal::ratio(1, 0), None);
    }

    #[test]
    fn test_text_literals_are_quoted() {
        assert_eq!(Literal::string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Literal::Char('\n').to_string(), "'\\n'");
        assert_eq!(Literal::int(-42).to_string(), "-42");
    }
}
