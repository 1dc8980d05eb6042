use super::Val;
use crate::error;
use crate::lang::ast::CompareOp;
use crate::lang::{number_prefix, Error};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Value arithmetic

pub struct Operation {}

impl Operation {
    fn number(n: f64) -> Result<Val> {
        if n.is_finite() {
            Ok(Val::Number(n))
        } else {
            Err(error!(Overflow))
        }
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f64, f64)> {
        Ok((f64::try_from(lhs)?, f64::try_from(rhs)?))
    }

    pub fn negate(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(-n)),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        let n = i16::try_from(val)?;
        Ok(Val::Number(!n as f64))
    }

    /// `+` adds numbers and concatenates strings. Strings that both
    /// read as numbers are added instead, and a number meeting a
    /// numeric string is added too.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Number(l), Number(r)) => Self::number(l + r),
            (String(l), String(r)) => match (Self::parse(&l), Self::parse(&r)) {
                (Some(l), Some(r)) => Self::number(l + r),
                _ => Ok(String(format!("{}{}", l, r).into())),
            },
            (Number(l), String(s)) | (String(s), Number(l)) => match Self::parse(&s) {
                Some(r) => Self::number(l + r),
                None => Err(error!(TypeMismatch)),
            },
        }
    }

    fn parse(s: &str) -> Option<f64> {
        let t = s.trim();
        if t.is_empty() {
            return None;
        }
        match t.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Self::number(l - r)
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Self::number(l * r)
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Self::number(l / r)
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        if l < 0.0 && r.fract() != 0.0 {
            return Err(error!(IllegalQuantity));
        }
        if l == 0.0 && r < 0.0 {
            return Err(error!(DivisionByZero));
        }
        Self::number(l.powf(r))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let l = i16::try_from(lhs)?;
        let r = i16::try_from(rhs)?;
        Ok(Val::Number((l & r) as f64))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let l = i16::try_from(lhs)?;
        let r = i16::try_from(rhs)?;
        Ok(Val::Number((l | r) as f64))
    }

    /// Both sides must be the same variant. True is -1, false is 0.
    pub fn compare(op: CompareOp, lhs: Val, rhs: Val) -> Result<Val> {
        use std::cmp::Ordering;
        let ordering = match (&lhs, &rhs) {
            (Val::Number(l), Val::Number(r)) => l.partial_cmp(r),
            (Val::String(l), Val::String(r)) => Some(l.cmp(r)),
            _ => return Err(error!(TypeMismatch)),
        };
        let result = match ordering {
            None => op == CompareOp::NotEqual,
            Some(ord) => match op {
                CompareOp::Equal => ord == Ordering::Equal,
                CompareOp::NotEqual => ord != Ordering::Equal,
                CompareOp::Less => ord == Ordering::Less,
                CompareOp::Greater => ord == Ordering::Greater,
                CompareOp::LessEqual => ord != Ordering::Greater,
                CompareOp::GreaterEqual => ord != Ordering::Less,
            },
        };
        Ok(Val::from(result))
    }

    /// `VAL` semantics: the leading number in a string, or 0.
    pub fn value_of(s: &str) -> f64 {
        number_prefix(s).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn n(n: f64) -> Val {
        Val::Number(n)
    }

    fn s(s: &str) -> Val {
        Val::from(s)
    }

    #[test]
    fn test_sum() {
        assert_eq!(Operation::sum(n(2.0), n(3.0)), Ok(n(5.0)));
        assert_eq!(Operation::sum(s("AB"), s("CD")), Ok(s("ABCD")));
        assert_eq!(Operation::sum(s("2"), s("3")), Ok(n(5.0)));
        assert_eq!(Operation::sum(n(1.0), s("2")), Ok(n(3.0)));
        assert_eq!(
            Operation::sum(n(1.0), s("X")).unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
    }

    #[test]
    fn test_strings_only_add() {
        assert_eq!(
            Operation::multiply(s("2"), n(3.0)).unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
        assert_eq!(
            Operation::negate(s("2")).unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::divide(n(7.0), n(2.0)), Ok(n(3.5)));
        assert_eq!(
            Operation::divide(n(1.0), n(0.0)).unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(Operation::power(n(2.0), n(10.0)), Ok(n(1024.0)));
        assert_eq!(Operation::power(n(-2.0), n(3.0)), Ok(n(-8.0)));
        assert_eq!(
            Operation::power(n(-8.0), n(0.5)).unwrap_err().code(),
            ErrorCode::IllegalQuantity
        );
        assert_eq!(
            Operation::power(n(0.0), n(-1.0)).unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
        assert_eq!(
            Operation::power(n(10.0), n(400.0)).unwrap_err().code(),
            ErrorCode::Overflow
        );
    }

    #[test]
    fn test_logic() {
        assert_eq!(Operation::and(n(12.0), n(10.0)), Ok(n(8.0)));
        assert_eq!(Operation::or(n(12.0), n(3.0)), Ok(n(15.0)));
        assert_eq!(Operation::not(n(0.0)), Ok(n(-1.0)));
        assert_eq!(Operation::not(n(-1.0)), Ok(n(0.0)));
        assert_eq!(
            Operation::and(n(70000.0), n(1.0)).unwrap_err().code(),
            ErrorCode::IllegalQuantity
        );
    }

    #[test]
    fn test_compare() {
        use CompareOp::*;
        assert_eq!(Operation::compare(Less, n(1.0), n(2.0)), Ok(n(-1.0)));
        assert_eq!(Operation::compare(GreaterEqual, n(1.0), n(2.0)), Ok(n(0.0)));
        assert_eq!(Operation::compare(Equal, s("A"), s("A")), Ok(n(-1.0)));
        assert_eq!(Operation::compare(Less, s("A"), s("B")), Ok(n(-1.0)));
        assert_eq!(
            Operation::compare(Equal, s("1"), n(1.0)).unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
    }
}
