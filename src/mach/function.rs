use super::{Operation, Val};
use crate::error;
use crate::lang::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::TryFrom;
use std::ops::RangeInclusive;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Bytes free as reported by a freshly started C64.
const FREE_MEMORY: f64 = 38911.0;

/// ## Built-in functions

pub struct Function {
    rng: StdRng,
    last_rnd: f64,
}

impl Default for Function {
    fn default() -> Self {
        Function {
            rng: StdRng::from_entropy(),
            last_rnd: 0.0,
        }
    }
}

impl Function {
    pub fn new() -> Function {
        Function::default()
    }

    pub fn arity(func_name: &str) -> Option<RangeInclusive<usize>> {
        match func_name {
            "ABS" | "ASC" | "ATN" | "CHR$" | "COS" | "EXP" | "FRE" | "INT" | "LEN" | "LOG"
            | "RND" | "SGN" | "SIN" | "SPC" | "SQR" | "STR$" | "TAN" | "VAL" => Some(1..=1),
            "LEFT$" | "RIGHT$" => Some(2..=2),
            "MID$" => Some(2..=3),
            _ => None,
        }
    }

    pub fn call(&mut self, func_name: &str, args: Vec<Val>) -> Result<Val> {
        let arity = match Function::arity(func_name) {
            Some(arity) => arity,
            None => return Err(error!(UndefinedFunction)),
        };
        if !arity.contains(&args.len()) {
            return Err(error!(SyntaxError));
        }
        let count = args.len();
        let mut args = args.into_iter();
        let mut arg = || match args.next() {
            Some(val) => Ok(val),
            None => Err(error!(SyntaxError)),
        };
        match func_name {
            "ABS" => Ok(Val::Number(number(arg()?)?.abs())),
            "ATN" => Ok(Val::Number(number(arg()?)?.atan())),
            "COS" => Ok(Val::Number(number(arg()?)?.cos())),
            "EXP" => finite(number(arg()?)?.exp()),
            "FRE" => {
                arg()?;
                Ok(Val::Number(FREE_MEMORY))
            }
            "INT" => Ok(Val::Number(number(arg()?)?.floor())),
            "LOG" => {
                let n = number(arg()?)?;
                if n <= 0.0 {
                    return Err(error!(IllegalQuantity));
                }
                Ok(Val::Number(n.ln()))
            }
            "RND" => Ok(Val::Number(self.rnd(number(arg()?)?))),
            "SGN" => {
                let n = number(arg()?)?;
                Ok(Val::Number(if n > 0.0 {
                    1.0
                } else if n < 0.0 {
                    -1.0
                } else {
                    0.0
                }))
            }
            "SIN" => Ok(Val::Number(number(arg()?)?.sin())),
            "SQR" => {
                let n = number(arg()?)?;
                if n < 0.0 {
                    return Err(error!(IllegalQuantity));
                }
                Ok(Val::Number(n.sqrt()))
            }
            "TAN" => finite(number(arg()?)?.tan()),
            "LEN" => Ok(Val::Number(string(arg()?)?.chars().count() as f64)),
            "ASC" => match string(arg()?)?.chars().next() {
                Some(ch) => Ok(Val::Number(ch as u32 as f64)),
                None => Err(error!(IllegalQuantity)),
            },
            "VAL" => Ok(Val::Number(Operation::value_of(&string(arg()?)?))),
            "CHR$" => {
                let code = byte(arg()?)?;
                Ok(Val::from(char::from(code as u8).to_string()))
            }
            "STR$" => {
                let val = Val::Number(number(arg()?)?);
                match val {
                    Val::Number(n) if n >= 0.0 => Ok(Val::from(format!(" {}", val))),
                    _ => Ok(Val::from(val.to_string())),
                }
            }
            "SPC" => Ok(Val::from(" ".repeat(byte(arg()?)?))),
            "LEFT$" => {
                let s = string(arg()?)?;
                let n = byte(arg()?)?;
                Ok(Val::from(s.chars().take(n).collect::<String>()))
            }
            "RIGHT$" => {
                let s = string(arg()?)?;
                let n = byte(arg()?)?;
                let len = s.chars().count();
                Ok(Val::from(
                    s.chars().skip(len.saturating_sub(n)).collect::<String>(),
                ))
            }
            "MID$" => {
                let s = string(arg()?)?;
                let start = byte(arg()?)?;
                if start == 0 {
                    return Err(error!(IllegalQuantity));
                }
                let len = if count == 3 { byte(arg()?)? } else { 255 };
                Ok(Val::from(
                    s.chars().skip(start - 1).take(len).collect::<String>(),
                ))
            }
            _ => Err(error!(UndefinedFunction)),
        }
    }

    /// Negative reseeds from the argument, zero repeats the last
    /// value, positive draws the next one.
    fn rnd(&mut self, n: f64) -> f64 {
        if n < 0.0 {
            self.rng = StdRng::seed_from_u64(n.to_bits());
        }
        if n != 0.0 {
            self.last_rnd = self.rng.gen::<f64>();
        }
        self.last_rnd
    }
}

fn number(val: Val) -> Result<f64> {
    f64::try_from(val)
}

fn string(val: Val) -> Result<Rc<str>> {
    Rc::<str>::try_from(val)
}

fn finite(n: f64) -> Result<Val> {
    if n.is_finite() {
        Ok(Val::Number(n))
    } else {
        Err(error!(Overflow))
    }
}

fn byte(val: Val) -> Result<usize> {
    let n = number(val)?.floor();
    if (0.0..=255.0).contains(&n) {
        Ok(n as usize)
    } else {
        Err(error!(IllegalQuantity))
    }
}
