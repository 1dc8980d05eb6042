use super::LineNumber;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    ArraySet(Rc<str>, Vec<Expression>, Expression),
    Data(Vec<Expression>),
    Def(Rc<str>, Rc<str>, Rc<Expression>),
    Dim(Vec<Variable>),
    End,
    For(Rc<str>, Expression, Expression, Option<Expression>),
    Gosub(LineNumber),
    Goto(LineNumber),
    If(Expression, Box<Statement>),
    Input(Option<Rc<str>>, Vec<Variable>),
    Let(Rc<str>, Expression),
    Next(Option<Rc<str>>),
    OnGosub(Expression, Vec<LineNumber>),
    OnGoto(Expression, Vec<LineNumber>),
    /// Items and whether a newline terminates the output.
    Print(Vec<Expression>, bool),
    Read(Vec<Variable>),
    Rem,
    Restore(Option<LineNumber>),
    Return,
    Run(Option<LineNumber>),
    Stop,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Rc<str>),
    Array(Rc<str>, Vec<Expression>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    String(Rc<str>),
    Var(Rc<str>),
    Array(Rc<str>, Vec<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Comparison(CompareOp, Box<Expression>, Box<Expression>),
    Function(Rc<str>, Vec<Expression>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    And,
    Or,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_variable(&mut self, _: &Variable) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Variable {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        if let Variable::Array(_, vec_expr) = self {
            for expr in vec_expr {
                expr.accept(visitor);
            }
        }
        visitor.visit_variable(self)
    }
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            End | Gosub(_) | Goto(_) | Next(_) | Rem | Restore(_) | Return | Run(_) | Stop => {}
            ArraySet(_, vec_expr, expr) => {
                for e in vec_expr {
                    e.accept(visitor);
                }
                expr.accept(visitor);
            }
            Data(vec_expr) | Print(vec_expr, _) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
            Def(_, _, expr) => expr.accept(visitor),
            Dim(vec_var) | Input(_, vec_var) | Read(vec_var) => {
                for var in vec_var {
                    var.accept(visitor);
                }
            }
            For(_, expr1, expr2, expr3) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
                if let Some(expr3) = expr3 {
                    expr3.accept(visitor);
                }
            }
            If(predicate, stmt) => {
                predicate.accept(visitor);
                stmt.accept(visitor);
            }
            Let(_, expr) | OnGosub(expr, _) | OnGoto(expr, _) => expr.accept(visitor),
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Number(_) | String(_) | Var(_) => {}
            Array(_, vec_expr) | Function(_, vec_expr) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
            Unary(_, expr) => expr.accept(visitor),
            Binary(_, expr1, expr2) | Comparison(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
