use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime value
///
/// Every BASIC variable, array element, DATA item, and intermediate
/// result is one of these.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(Rc<str>),
}

impl Val {
    /// The zero value for a variable of the given name:
    /// empty string for `$` names, zero otherwise.
    pub fn zero_for(name: &str) -> Val {
        if name.ends_with('$') {
            Val::String("".into())
        } else {
            Val::Number(0.0)
        }
    }

    pub fn is_true(&self) -> bool {
        match self {
            Val::Number(n) => *n != 0.0,
            Val::String(s) => !s.is_empty(),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }

    /// Whether this value may be stored in a variable of the given name.
    pub fn fits(&self, name: &str) -> bool {
        self.is_string() == name.ends_with('$')
    }
}

impl Default for Val {
    fn default() -> Self {
        Val::Number(0.0)
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::String(s) => write!(f, "{}", s),
            // f64 Display already prints integral values without a point
            // and everything else as the shortest round-trip decimal.
            Val::Number(n) if *n == 0.0 => write!(f, "0"),
            Val::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Self {
        Val::Number(n)
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Self {
        Val::Number(if b { -1.0 } else { 0.0 })
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::String(s.into())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Self {
        Val::String(s.into())
    }
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<f64> {
        match val {
            Val::Number(n) => Ok(n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for i16 {
    type Error = Error;
    fn try_from(val: Val) -> Result<i16> {
        let n = f64::try_from(val)?.floor();
        if n < i16::min_value() as f64 || n > i16::max_value() as f64 {
            Err(error!(IllegalQuantity))
        } else {
            Ok(n as i16)
        }
    }
}

impl TryFrom<Val> for Rc<str> {
    type Error = Error;
    fn try_from(val: Val) -> Result<Rc<str>> {
        match val {
            Val::String(s) => Ok(s),
            Val::Number(_) => Err(error!(TypeMismatch)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::Number(14.0).to_string(), "14");
        assert_eq!(Val::Number(-3.0).to_string(), "-3");
        assert_eq!(Val::Number(2.5).to_string(), "2.5");
        assert_eq!(Val::Number(0.1).to_string(), "0.1");
        assert_eq!(Val::Number(-0.0).to_string(), "0");
        assert_eq!(Val::from("HI").to_string(), "HI");
    }

    #[test]
    fn test_truth() {
        assert!(Val::Number(-1.0).is_true());
        assert!(!Val::Number(0.0).is_true());
        assert!(Val::from("X").is_true());
        assert!(!Val::from("").is_true());
    }

    #[test]
    fn test_fits() {
        assert!(Val::from("X").fits("A$"));
        assert!(!Val::from("X").fits("A"));
        assert!(Val::Number(1.0).fits("A"));
        assert!(!Val::Number(1.0).fits("A$"));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(i16::try_from(Val::Number(3.7)), Ok(3));
        assert_eq!(i16::try_from(Val::Number(-0.5)), Ok(-1));
        assert!(i16::try_from(Val::Number(40000.0)).is_err());
        assert!(f64::try_from(Val::from("1")).is_err());
    }
}
