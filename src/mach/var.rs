use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

type Result<T> = std::result::Result<T, Error>;

/// Largest number of elements all arrays together may hold.
const MAX_ARRAY_SLOTS: usize = 1 << 16;

/// ## Variable memory
///
/// Scalars and arrays live in separate namespaces, both keyed by
/// normalized name so `AB`, `ABC` and `ABBA` are the same variable.

#[derive(Debug)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    arrays: HashMap<Rc<str>, Array>,
    slots: usize,
    started: Instant,
}

#[derive(Debug)]
struct Array {
    dims: Vec<usize>,
    data: Vec<Val>,
}

impl Default for Var {
    fn default() -> Self {
        Var {
            vars: HashMap::default(),
            arrays: HashMap::default(),
            slots: 0,
            started: Instant::now(),
        }
    }
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.arrays.clear();
        self.slots = 0;
    }

    /// Two significant characters; the `$` type suffix is kept.
    pub fn normalize(name: &str) -> Rc<str> {
        let string = name.ends_with('$');
        let stem = name.trim_end_matches('$');
        let mut s: String = stem.chars().take(2).collect();
        if string {
            s.push('$');
        }
        s.into()
    }

    fn is_reserved(key: &str) -> bool {
        key == "TI" || key == "TI$"
    }

    pub fn fetch(&self, var_name: &str) -> Val {
        let key = Var::normalize(var_name);
        match &*key {
            "TI" => Val::Number((self.started.elapsed().as_millis() * 60 / 1000) as f64),
            "TI$" => Val::from(chrono::Local::now().format("%H%M%S").to_string()),
            _ => match self.vars.get(&key) {
                Some(val) => val.clone(),
                None => Val::zero_for(&key),
            },
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) -> Result<()> {
        let key = Var::normalize(var_name);
        if Var::is_reserved(&key) {
            return Err(error!(SyntaxError));
        }
        if !value.fits(&key) {
            return Err(error!(TypeMismatch));
        }
        if self.vars.len() > u16::max_value() as usize {
            return Err(error!(OutOfMemory));
        }
        self.vars.insert(key, value);
        Ok(())
    }

    pub fn dimension_array(&mut self, var_name: &str, sizes: &[Val]) -> Result<()> {
        let key = Var::normalize(var_name);
        if self.arrays.contains_key(&key) {
            return Err(error!(RedimensionedArray));
        }
        let mut dims = vec![];
        for size in sizes {
            dims.push(Var::whole_number(size)?);
        }
        self.allocate(key, dims)
    }

    pub fn fetch_array(&mut self, var_name: &str, indices: &[Val]) -> Result<Val> {
        let key = Var::normalize(var_name);
        let offset = self.offset(&key, indices)?;
        match self.arrays.get(&key).and_then(|a| a.data.get(offset)) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(BadSubscript)),
        }
    }

    pub fn store_array(&mut self, var_name: &str, indices: &[Val], value: Val) -> Result<()> {
        let key = Var::normalize(var_name);
        if !value.fits(&key) {
            return Err(error!(TypeMismatch));
        }
        let offset = self.offset(&key, indices)?;
        match self.arrays.get_mut(&key).and_then(|a| a.data.get_mut(offset)) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(error!(BadSubscript)),
        }
    }

    fn allocate(&mut self, key: Rc<str>, dims: Vec<usize>) -> Result<()> {
        let mut len: usize = 1;
        for d in &dims {
            len = match len.checked_mul(d + 1) {
                Some(len) if self.slots + len <= MAX_ARRAY_SLOTS => len,
                _ => return Err(error!(OutOfMemory)),
            };
        }
        self.slots += len;
        let data = vec![Val::zero_for(&key); len];
        self.arrays.insert(key, Array { dims, data });
        Ok(())
    }

    /// Row-major offset of `indices`. An array used before any DIM
    /// gets 10 in each dimension.
    fn offset(&mut self, key: &Rc<str>, indices: &[Val]) -> Result<usize> {
        let mut requested = vec![];
        for index in indices {
            requested.push(Var::whole_number(index)?);
        }
        if !self.arrays.contains_key(key) {
            self.allocate(key.clone(), vec![10; requested.len()])?;
        }
        let dims = match self.arrays.get(key) {
            Some(array) => &array.dims,
            None => return Err(error!(BadSubscript)),
        };
        if dims.len() != requested.len() {
            return Err(error!(BadSubscript));
        }
        let mut offset = 0;
        for (r, d) in requested.iter().zip(dims) {
            if r > d {
                return Err(error!(BadSubscript));
            }
            offset = offset * (d + 1) + r;
        }
        Ok(offset)
    }

    fn whole_number(val: &Val) -> Result<usize> {
        match val {
            Val::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u16::max_value() as f64 => {
                Ok(*n as usize)
            }
            Val::Number(_) => Err(error!(IllegalQuantity)),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}
