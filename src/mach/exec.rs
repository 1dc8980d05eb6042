use super::{Machine, Operation, Val};
use crate::error;
use crate::lang::ast::*;
use crate::lang::{split_data, DataItem, Error, LineNumber};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// PETSCII clear-screen.
const CLEAR_SCREEN: char = '\u{93}';

impl Statement {
    pub fn execute(&self, m: &mut dyn Machine) -> Result<()> {
        use Statement::*;
        match self {
            ArraySet(name, indices, expr) => {
                let indices = evaluate_all(indices, m)?;
                let value = expr.evaluate(m)?;
                m.set_array_element(name, &indices, value)
            }
            Data(_) | Rem => Ok(()),
            Def(name, param, body) => m.define_function(name, param, body.clone()),
            Dim(vars) => {
                for var in vars {
                    match var {
                        Variable::Array(name, sizes) => {
                            let sizes = evaluate_all(sizes, m)?;
                            m.declare_array(name, &sizes)?;
                        }
                        Variable::Unary(_) => return Err(error!(SyntaxError)),
                    }
                }
                Ok(())
            }
            End => {
                m.end();
                Ok(())
            }
            For(name, from, to, step) => {
                let from = f64::try_from(from.evaluate(m)?)?;
                let to = f64::try_from(to.evaluate(m)?)?;
                let step = match step {
                    Some(step) => f64::try_from(step.evaluate(m)?)?,
                    None => 1.0,
                };
                m.begin_for(name, from, to, step)
            }
            Gosub(line) => m.gosub(*line),
            Goto(line) => m.goto(*line),
            If(predicate, then) => {
                if predicate.evaluate(m)?.is_true() {
                    then.execute(m)
                } else {
                    m.skip_line();
                    Ok(())
                }
            }
            Input(prompt, vars) => r#input(prompt.as_deref(), vars, m),
            Let(name, expr) => {
                let value = expr.evaluate(m)?;
                m.set_variable(name, value)
            }
            Next(name) => m.iterate_for(name.as_deref()),
            OnGosub(expr, lines) => match on_target(expr, lines, m)? {
                Some(line) => m.gosub(line),
                None => Ok(()),
            },
            OnGoto(expr, lines) => match on_target(expr, lines, m)? {
                Some(line) => m.goto(line),
                None => Ok(()),
            },
            Print(items, newline) => r#print(items, *newline, m),
            Read(vars) => {
                for var in vars {
                    let value = m.read_data()?;
                    assign(var, value, m)?;
                }
                Ok(())
            }
            Restore(line) => m.restore_data(*line),
            Return => m.return_from_gosub(),
            Run(line) => m.run(*line),
            Stop => m.stop(),
        }
    }
}

impl Expression {
    pub fn evaluate(&self, m: &mut dyn Machine) -> Result<Val> {
        use Expression::*;
        match self {
            Number(n) => Ok(Val::Number(*n)),
            String(s) => Ok(Val::String(s.clone())),
            Var(name) => m.get_variable(name),
            Array(name, indices) => {
                let indices = evaluate_all(indices, m)?;
                m.get_array_element(name, &indices)
            }
            Unary(op, expr) => {
                let val = expr.evaluate(m)?;
                match op {
                    UnaryOp::Negate => Operation::negate(val),
                    UnaryOp::Not => Operation::not(val),
                }
            }
            Binary(op, lhs, rhs) => {
                let lhs = lhs.evaluate(m)?;
                let rhs = rhs.evaluate(m)?;
                match op {
                    BinaryOp::Add => Operation::sum(lhs, rhs),
                    BinaryOp::Subtract => Operation::subtract(lhs, rhs),
                    BinaryOp::Multiply => Operation::multiply(lhs, rhs),
                    BinaryOp::Divide => Operation::divide(lhs, rhs),
                    BinaryOp::Power => Operation::power(lhs, rhs),
                    BinaryOp::And => Operation::and(lhs, rhs),
                    BinaryOp::Or => Operation::or(lhs, rhs),
                }
            }
            Comparison(op, lhs, rhs) => {
                let lhs = lhs.evaluate(m)?;
                let rhs = rhs.evaluate(m)?;
                Operation::compare(*op, lhs, rhs)
            }
            Function(name, args) => {
                let args = evaluate_all(args, m)?;
                m.call_function(name, args)
            }
        }
    }
}

fn evaluate_all(exprs: &[Expression], m: &mut dyn Machine) -> Result<Vec<Val>> {
    let mut v = Vec::with_capacity(exprs.len());
    for expr in exprs {
        v.push(expr.evaluate(m)?);
    }
    Ok(v)
}

fn assign(var: &Variable, value: Val, m: &mut dyn Machine) -> Result<()> {
    match var {
        Variable::Unary(name) => m.set_variable(name, value),
        Variable::Array(name, indices) => {
            let indices = evaluate_all(indices, m)?;
            m.set_array_element(name, &indices, value)
        }
    }
}

fn variable_name(var: &Variable) -> &str {
    match var {
        Variable::Unary(name) | Variable::Array(name, _) => name,
    }
}

/// 1-based pick from `lines`; zero or past the end selects nothing.
fn on_target(
    expr: &Expression,
    lines: &[LineNumber],
    m: &mut dyn Machine,
) -> Result<Option<LineNumber>> {
    let n = f64::try_from(expr.evaluate(m)?)?.trunc();
    if n < 0.0 || n > 255.0 {
        return Err(error!(IllegalQuantity));
    }
    let n = n as usize;
    if n == 0 {
        return Ok(None);
    }
    Ok(lines.get(n - 1).copied())
}

fn needs_space(prev: &str, next: &str) -> bool {
    let boundary = |c: Option<char>| match c {
        Some(c) => !c.is_whitespace() && !c.is_ascii_punctuation(),
        None => false,
    };
    boundary(prev.chars().last()) && boundary(next.chars().next())
}

fn r#print(items: &[Expression], newline: bool, m: &mut dyn Machine) -> Result<()> {
    let mut out = String::new();
    let mut prev: Option<(String, bool)> = None;
    for item in items {
        let val = item.evaluate(m)?;
        let numeric = !val.is_string();
        let mut text = val.to_string();
        if text.contains(CLEAR_SCREEN) {
            if !out.is_empty() {
                m.print(&out)?;
                out.clear();
            }
            m.clear_screen()?;
            text.retain(|c| c != CLEAR_SCREEN);
            prev = None;
        }
        if let Some((prev_text, prev_numeric)) = &prev {
            if (numeric || *prev_numeric) && needs_space(prev_text, &text) {
                out.push(' ');
            }
        }
        out.push_str(&text);
        prev = Some((text, numeric));
    }
    if newline {
        m.print_line(&out)
    } else if out.is_empty() {
        Ok(())
    } else {
        m.print(&out)
    }
}

/// Converts a reply field for the variable it lands in. `None` means
/// the text can't be a number.
fn input_value(name: &str, item: &DataItem) -> Option<Val> {
    if name.ends_with('$') {
        return Some(Val::from(item.text()));
    }
    let text = item.text().trim();
    if text.is_empty() {
        return Some(Val::Number(0.0));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Val::Number(n)),
        _ => None,
    }
}

fn r#input(prompt: Option<&str>, vars: &[Variable], m: &mut dyn Machine) -> Result<()> {
    let prompt = match prompt {
        Some(p) => format!("{}? ", p),
        None => "? ".to_string(),
    };
    'redo: loop {
        let mut items: Vec<DataItem> = vec![];
        let mut ask = prompt.as_str();
        while items.len() < vars.len() {
            let reply = m.input(ask)?;
            items.extend(split_data(&reply));
            ask = "?? ";
        }
        let mut values = Vec::with_capacity(vars.len());
        for (var, item) in vars.iter().zip(items.iter()) {
            match input_value(variable_name(var), item) {
                Some(value) => values.push(value),
                None => {
                    m.print_line("?REDO FROM START")?;
                    continue 'redo;
                }
            }
        }
        for (var, value) in vars.iter().zip(values.into_iter()) {
            assign(var, value, m)?;
        }
        if items.len() > vars.len() {
            m.print_line("?EXTRA IGNORED")?;
        }
        return Ok(());
    }
}
