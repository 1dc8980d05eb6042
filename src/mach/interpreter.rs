use super::{Function, Machine, Runtime, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{AcceptVisitor, Expression, Statement, Visitor};
use crate::lang::{Error, LineNumber, Program};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_MAX_STEPS: usize = 1000;
pub const DEFAULT_STACK_LIMIT: usize = 256;

/// Position of a statement: line index and statement index.
type Position = (usize, usize);

#[derive(Debug)]
struct ForLoop {
    var: Rc<str>,
    to: f64,
    step: f64,
    resume: Position,
}

impl ForLoop {
    fn continues(&self, value: f64) -> bool {
        if self.step > 0.0 {
            value <= self.to
        } else {
            value >= self.to
        }
    }
}

#[derive(Debug)]
struct UserFunction {
    param: Rc<str>,
    body: Rc<Expression>,
}

/// ## Execution engine
///
/// Walks a `Program` statement by statement. Variables and arrays
/// survive from one `execute` to the next until `clear` is called or
/// the program says `RUN`.
pub struct Interpreter<R: Runtime> {
    runtime: R,
    var: Var,
    function: Function,
    functions: HashMap<Rc<str>, UserFunction>,
    fn_depth: usize,
    for_stack: Stack<ForLoop>,
    gosub_stack: Stack<usize>,
    data: Vec<Val>,
    data_lines: Vec<(LineNumber, usize)>,
    data_pos: usize,
    line_index: HashMap<LineNumber, usize>,
    line_numbers: Vec<LineNumber>,
    for_exits: HashMap<Position, Position>,
    pc: usize,
    statement_index: usize,
    step_count: usize,
    max_steps: usize,
    halted: bool,
    line_jumped: bool,
    statement_jumped: bool,
    interrupt: Arc<AtomicBool>,
}

impl<R: Runtime> Interpreter<R> {
    pub fn new(runtime: R) -> Interpreter<R> {
        Interpreter {
            runtime,
            var: Var::new(),
            function: Function::new(),
            functions: HashMap::default(),
            fn_depth: 0,
            for_stack: Stack::new(DEFAULT_STACK_LIMIT),
            gosub_stack: Stack::new(DEFAULT_STACK_LIMIT),
            data: vec![],
            data_lines: vec![],
            data_pos: 0,
            line_index: HashMap::default(),
            line_numbers: vec![],
            for_exits: HashMap::default(),
            pc: 0,
            statement_index: 0,
            step_count: 0,
            max_steps: DEFAULT_MAX_STEPS,
            halted: false,
            line_jumped: false,
            statement_jumped: false,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Zero disables the limit.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Bounds GOSUB depth, FOR nesting, and user function recursion.
    pub fn with_stack_limit(mut self, limit: usize) -> Self {
        self.for_stack.set_limit(limit);
        self.gosub_stack.set_limit(limit);
        self
    }

    /// Setting the flag stops the running program with BREAK
    /// before its next statement.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Forget variables, arrays, user functions, and both stacks.
    pub fn clear(&mut self) {
        self.var.clear();
        self.functions.clear();
        self.for_stack.clear();
        self.gosub_stack.clear();
        self.data_pos = 0;
    }

    pub fn execute(&mut self, program: &Program) -> Result<()> {
        self.reset();
        self.link(program);
        self.load_data(program)?;
        let lines = program.lines();
        while self.pc < lines.len() && !self.halted {
            let line = &lines[self.pc];
            let statement = match line.statements().get(self.statement_index) {
                Some(statement) => statement,
                None => {
                    self.pc += 1;
                    self.statement_index = 0;
                    continue;
                }
            };
            if let Err(error) = self.step() {
                return Err(error.in_line_number(line.number()));
            }
            if let Err(error) = statement.execute(self) {
                return Err(error.in_line_number(line.number()));
            }
            if self.halted {
                break;
            }
            if self.line_jumped {
                self.line_jumped = false;
                self.statement_jumped = false;
                continue;
            }
            if self.statement_jumped {
                self.statement_jumped = false;
                continue;
            }
            self.statement_index += 1;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.pc = 0;
        self.statement_index = 0;
        self.step_count = 0;
        self.halted = false;
        self.line_jumped = false;
        self.statement_jumped = false;
        self.data_pos = 0;
        self.fn_depth = 0;
        self.for_stack.clear();
        self.gosub_stack.clear();
        self.interrupt.store(false, Ordering::SeqCst);
    }

    fn step(&mut self) -> Result<()> {
        if self.interrupt.swap(false, Ordering::SeqCst) {
            return Err(error!(Break));
        }
        self.step_count += 1;
        if self.max_steps > 0 && self.step_count > self.max_steps {
            return Err(error!(InfiniteLoop));
        }
        Ok(())
    }

    /// Build the line number index and find where each FOR goes when
    /// its body must be skipped. The first of duplicate line numbers wins.
    fn link(&mut self, program: &Program) {
        self.line_index.clear();
        self.line_numbers.clear();
        for (index, line) in program.lines().iter().enumerate() {
            self.line_index.entry(line.number()).or_insert(index);
            self.line_numbers.push(line.number());
        }
        let positions: Vec<(Position, &Statement)> = program
            .lines()
            .iter()
            .enumerate()
            .flat_map(|(li, line)| {
                line.statements()
                    .iter()
                    .enumerate()
                    .map(move |(si, statement)| ((li, si), unwrap_if(statement)))
            })
            .collect();
        self.for_exits.clear();
        for (start, (position, statement)) in positions.iter().enumerate() {
            if let Statement::For(var, ..) = statement {
                let var = Var::normalize(var);
                if let Some((li, si)) = matching_next(&var, &positions[start + 1..]) {
                    self.for_exits.insert(*position, (li, si + 1));
                }
            }
        }
    }

    /// Evaluate every DATA item in textual order into the pool.
    fn load_data(&mut self, program: &Program) -> Result<()> {
        self.data.clear();
        self.data_lines.clear();
        for line in program.lines() {
            let mut collector = DataCollector::default();
            for statement in line.statements() {
                statement.accept(&mut collector);
            }
            if collector.items.is_empty() {
                continue;
            }
            self.data_lines.push((line.number(), self.data.len()));
            for expr in &collector.items {
                match expr.evaluate(self) {
                    Ok(val) => self.data.push(val),
                    Err(e) => return Err(e.in_line_number(line.number())),
                }
            }
        }
        Ok(())
    }

    fn current_line_number(&self) -> Option<LineNumber> {
        self.line_numbers.get(self.pc).copied()
    }

    fn jump_to(&mut self, (line, statement): Position) {
        self.pc = line;
        self.statement_index = statement;
        self.statement_jumped = true;
    }

    fn resolve(&self, line: LineNumber) -> Result<usize> {
        match self.line_index.get(&line) {
            Some(index) => Ok(*index),
            None => Err(error!(UndefinedStatement)),
        }
    }
}

/// A FOR or NEXT behind an IF still counts for loop matching.
fn unwrap_if(statement: &Statement) -> &Statement {
    match statement {
        Statement::If(_, then) => unwrap_if(then),
        _ => statement,
    }
}

/// The NEXT that closes a loop on `var`, skipping over nested loops.
fn matching_next(var: &str, rest: &[(Position, &Statement)]) -> Option<Position> {
    let mut depth = 0;
    for (position, statement) in rest {
        match statement {
            Statement::For(..) => depth += 1,
            Statement::Next(Some(name)) => {
                if *Var::normalize(name) == *var {
                    return Some(*position);
                }
                if depth > 0 {
                    depth -= 1;
                }
            }
            Statement::Next(None) => {
                if depth == 0 {
                    return Some(*position);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

#[derive(Default)]
struct DataCollector {
    items: Vec<Expression>,
}

impl Visitor for DataCollector {
    fn visit_statement(&mut self, statement: &Statement) {
        if let Statement::Data(items) = statement {
            self.items.extend(items.iter().cloned());
        }
    }
}

impl<R: Runtime> Machine for Interpreter<R> {
    fn get_variable(&mut self, name: &str) -> Result<Val> {
        Ok(self.var.fetch(name))
    }

    fn set_variable(&mut self, name: &str, value: Val) -> Result<()> {
        self.var.store(name, value)
    }

    fn declare_array(&mut self, name: &str, sizes: &[Val]) -> Result<()> {
        self.var.dimension_array(name, sizes)
    }

    fn get_array_element(&mut self, name: &str, indices: &[Val]) -> Result<Val> {
        self.var.fetch_array(name, indices)
    }

    fn set_array_element(&mut self, name: &str, indices: &[Val], value: Val) -> Result<()> {
        self.var.store_array(name, indices, value)
    }

    fn read_data(&mut self) -> Result<Val> {
        match self.data.get(self.data_pos) {
            Some(val) => {
                self.data_pos += 1;
                Ok(val.clone())
            }
            None => Err(error!(OutOfData)),
        }
    }

    fn restore_data(&mut self, line: Option<LineNumber>) -> Result<()> {
        self.data_pos = match line {
            None => 0,
            Some(number) => self
                .data_lines
                .iter()
                .find(|(n, _)| *n >= number)
                .map(|(_, offset)| *offset)
                .unwrap_or_else(|| self.data.len()),
        };
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.runtime.print(text)
    }

    fn print_line(&mut self, text: &str) -> Result<()> {
        self.runtime.print_line(text)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.runtime.input(prompt)
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.runtime.clear()
    }

    fn goto(&mut self, line: LineNumber) -> Result<()> {
        self.pc = self.resolve(line)?;
        self.statement_index = 0;
        self.line_jumped = true;
        Ok(())
    }

    fn gosub(&mut self, line: LineNumber) -> Result<()> {
        let target = self.resolve(line)?;
        self.gosub_stack.push(self.pc + 1)?;
        self.pc = target;
        self.statement_index = 0;
        self.line_jumped = true;
        Ok(())
    }

    fn return_from_gosub(&mut self) -> Result<()> {
        match self.gosub_stack.pop() {
            Some(line) => {
                self.pc = line;
                self.statement_index = 0;
                self.line_jumped = true;
                Ok(())
            }
            None => Err(error!(ReturnWithoutGosub)),
        }
    }

    fn end(&mut self) {
        self.halted = true;
    }

    fn stop(&mut self) -> Result<()> {
        let message = match self.current_line_number() {
            Some(number) => format!("BREAK IN {}", number),
            None => "BREAK".to_string(),
        };
        self.runtime.print_line(&message)?;
        self.halted = true;
        Ok(())
    }

    fn run(&mut self, line: Option<LineNumber>) -> Result<()> {
        let target = match line {
            Some(line) => self.resolve(line)?,
            None => 0,
        };
        self.clear();
        self.pc = target;
        self.statement_index = 0;
        self.line_jumped = true;
        Ok(())
    }

    fn skip_line(&mut self) {
        self.pc += 1;
        self.statement_index = 0;
        self.line_jumped = true;
    }

    fn begin_for(&mut self, name: &str, from: f64, to: f64, step: f64) -> Result<()> {
        if step == 0.0 {
            return Err(error!(IllegalQuantity));
        }
        let var = Var::normalize(name);
        if let Some(index) = self.for_stack.rposition(|f| f.var == var) {
            self.for_stack.truncate(index);
        }
        self.var.store(&var, Val::Number(from))?;
        let context = ForLoop {
            var,
            to,
            step,
            resume: (self.pc, self.statement_index + 1),
        };
        if context.continues(from) {
            return self.for_stack.push(context);
        }
        match self.for_exits.get(&(self.pc, self.statement_index)) {
            Some(exit) => {
                let exit = *exit;
                self.jump_to(exit);
                Ok(())
            }
            None => Err(error!(ForWithoutNext)),
        }
    }

    fn iterate_for(&mut self, name: Option<&str>) -> Result<()> {
        let index = match name {
            Some(name) => {
                let var = Var::normalize(name);
                self.for_stack.rposition(|f| f.var == var)
            }
            None => self.for_stack.len().checked_sub(1),
        };
        let index = match index {
            Some(index) => index,
            None => return Err(error!(NextWithoutFor)),
        };
        self.for_stack.truncate(index + 1);
        let (var, step) = match self.for_stack.last() {
            Some(context) => (context.var.clone(), context.step),
            None => return Err(error!(NextWithoutFor)),
        };
        let value = match self.var.fetch(&var) {
            Val::Number(n) => n + step,
            Val::String(_) => return Err(error!(TypeMismatch)),
        };
        let resume = match self.for_stack.last() {
            Some(context) if context.continues(value) => Some(context.resume),
            _ => None,
        };
        match resume {
            Some(position) => {
                self.var.store(&var, Val::Number(value))?;
                self.jump_to(position);
            }
            // The variable keeps its last value inside the range.
            None => {
                self.for_stack.pop();
            }
        }
        Ok(())
    }

    fn define_function(&mut self, name: &str, param: &str, body: Rc<Expression>) -> Result<()> {
        self.functions.insert(
            name.into(),
            UserFunction {
                param: param.into(),
                body,
            },
        );
        Ok(())
    }

    fn call_function(&mut self, name: &str, mut args: Vec<Val>) -> Result<Val> {
        if !name.starts_with("FN") {
            return self.function.call(name, args);
        }
        let (param, body) = match self.functions.get(name) {
            Some(f) => (f.param.clone(), f.body.clone()),
            None => return Err(error!(UndefinedFunction)),
        };
        if args.len() != 1 {
            return Err(error!(SyntaxError));
        }
        let arg = args.remove(0);
        if !arg.fits(&param) {
            return Err(error!(TypeMismatch));
        }
        if self.fn_depth >= self.gosub_stack.limit() {
            return Err(error!(StackOverflow));
        }
        let saved = self.var.fetch(&param);
        self.var.store(&param, arg)?;
        self.fn_depth += 1;
        let result = body.evaluate(self);
        self.fn_depth -= 1;
        self.var.store(&param, saved)?;
        result
    }

    fn normalize(&self, name: &str) -> Rc<str> {
        Var::normalize(name)
    }
}
