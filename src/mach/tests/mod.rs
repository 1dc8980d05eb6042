use crate::lang::ast::Expression;
use crate::lang::{Error, LineNumber, Program};
use crate::mach::{Function, Interpreter, Machine, Scripted, Val, Var};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;


type Result<T> = std::result::Result<T, Error>;

fn run(source: &str) -> (Result<()>, Scripted) {
    run_with(source, Vec::<String>::new())
}

fn run_with(source: &str, inputs: Vec<impl Into<String>>) -> (Result<()>, Scripted) {
    let program = Program::parse(source).unwrap();
    let mut interpreter = Interpreter::new(Scripted::new(inputs));
    let r = interpreter.execute(&program);
    (r, interpreter.into_runtime())
}

/// Records what statements ask for, with no interpreter behind it.
#[derive(Default)]
struct FakeMachine {
    vars: HashMap<Rc<str>, Val>,
    data: VecDeque<Val>,
    inputs: VecDeque<String>,
    log: Vec<String>,
}

impl FakeMachine {
    fn with_inputs(inputs: &[&str]) -> FakeMachine {
        FakeMachine {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..FakeMachine::default()
        }
    }

    fn var(&self, name: &str) -> Val {
        self.vars
            .get(&Var::normalize(name))
            .cloned()
            .unwrap_or_else(|| Val::zero_for(name))
    }
}

impl Machine for FakeMachine {
    fn get_variable(&mut self, name: &str) -> Result<Val> {
        Ok(self.var(name))
    }
    fn set_variable(&mut self, name: &str, value: Val) -> Result<()> {
        self.log.push(format!("set {}={}", name, value));
        self.vars.insert(Var::normalize(name), value);
        Ok(())
    }
    fn declare_array(&mut self, name: &str, sizes: &[Val]) -> Result<()> {
        self.log.push(format!("dim {}{:?}", name, sizes));
        Ok(())
    }
    fn get_array_element(&mut self, _name: &str, _indices: &[Val]) -> Result<Val> {
        Ok(Val::Number(0.0))
    }
    fn set_array_element(&mut self, name: &str, indices: &[Val], value: Val) -> Result<()> {
        self.log.push(format!("set {}{:?}={}", name, indices, value));
        Ok(())
    }
    fn read_data(&mut self) -> Result<Val> {
        match self.data.pop_front() {
            Some(v) => Ok(v),
            None => Err(crate::error!(OutOfData)),
        }
    }
    fn restore_data(&mut self, line: Option<LineNumber>) -> Result<()> {
        self.log.push(format!("restore {:?}", line));
        Ok(())
    }
    fn print(&mut self, text: &str) -> Result<()> {
        self.log.push(format!("print {:?}", text));
        Ok(())
    }
    fn print_line(&mut self, text: &str) -> Result<()> {
        self.log.push(format!("print_line {:?}", text));
        Ok(())
    }
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.log.push(format!("input {:?}", prompt));
        match self.inputs.pop_front() {
            Some(s) => Ok(s),
            None => Err(crate::error!(InputPastEnd)),
        }
    }
    fn clear_screen(&mut self) -> Result<()> {
        self.log.push("clear".to_string());
        Ok(())
    }
    fn goto(&mut self, line: LineNumber) -> Result<()> {
        self.log.push(format!("goto {}", line));
        Ok(())
    }
    fn gosub(&mut self, line: LineNumber) -> Result<()> {
        self.log.push(format!("gosub {}", line));
        Ok(())
    }
    fn return_from_gosub(&mut self) -> Result<()> {
        self.log.push("return".to_string());
        Ok(())
    }
    fn end(&mut self) {
        self.log.push("end".to_string());
    }
    fn stop(&mut self) -> Result<()> {
        self.log.push("stop".to_string());
        Ok(())
    }
    fn run(&mut self, line: Option<LineNumber>) -> Result<()> {
        self.log.push(format!("run {:?}", line));
        Ok(())
    }
    fn skip_line(&mut self) {
        self.log.push("skip_line".to_string());
    }
    fn begin_for(&mut self, name: &str, from: f64, to: f64, step: f64) -> Result<()> {
        self.log.push(format!("for {} {} {} {}", name, from, to, step));
        Ok(())
    }
    fn iterate_for(&mut self, name: Option<&str>) -> Result<()> {
        self.log.push(format!("next {:?}", name));
        Ok(())
    }
    fn define_function(&mut self, name: &str, param: &str, _body: Rc<Expression>) -> Result<()> {
        self.log.push(format!("def {}({})", name, param));
        Ok(())
    }
    fn call_function(&mut self, name: &str, args: Vec<Val>) -> Result<Val> {
        Function::new().call(name, args)
    }
    fn normalize(&self, name: &str) -> Rc<str> {
        Var::normalize(name)
    }
}
