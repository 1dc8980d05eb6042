use super::lex::{split_data, DataItem};
use super::{ast::*, token::*, Error, LineNumber};
use crate::error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(line_number: Option<LineNumber>, tokens: &[Token]) -> Result<Vec<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => match line_number {
            Some(number) => Err(e.in_line_number(number)),
            None => Err(e),
        },
        Ok(r) => Ok(r),
    }
}

const PRECEDENCE_OR: usize = 1;
const PRECEDENCE_AND: usize = 2;
const PRECEDENCE_NOT: usize = 3;
const PRECEDENCE_UNARY: usize = 7;

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
        };
        let mut r: Vec<Statement> = vec![];
        loop {
            match parse.peek() {
                None => return Ok(r),
                Some(Token::Colon) => {
                    parse.next();
                    continue;
                }
                Some(_) => {}
            }
            match parse.peek() {
                Some(Token::Word(Word::Next)) => {
                    parse.next();
                    r.append(&mut Statement::r#next(&mut parse)?);
                }
                _ => r.push(parse.statement()?),
            }
            match parse.next() {
                None | Some(Token::Colon) => {}
                Some(_) => return Err(error!(SyntaxError; "EXPECTED END OF STATEMENT")),
            }
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            let t = self.token_stream.next()?;
            if let Token::Whitespace(_) = t {
                continue;
            }
            return Some(t);
        }
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => Statement::for_word(self, Word::Let),
            Some(Token::Word(word)) => {
                let word = *word;
                self.next();
                Statement::for_word(self, word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Ident(i)) => {
                    let name: Rc<str> = i.name().into();
                    match this.peek() {
                        Some(Token::LParen) => Expression::Array(name, this.expression_list()?),
                        _ => Expression::Var(name),
                    }
                }
                Some(Token::Function(f)) => {
                    Expression::Function((*f).into(), this.expression_list()?)
                }
                Some(Token::Word(Word::Fn)) => {
                    let name = format!("FN{}", this.ident()?.name());
                    Expression::Function(name.into(), this.expression_list()?)
                }
                Some(Token::Literal(l)) => Expression::for_literal(l)?,
                Some(Token::Operator(Operator::Minus)) => Expression::Unary(
                    UnaryOp::Negate,
                    Box::new(parse(this, PRECEDENCE_UNARY)?),
                ),
                Some(Token::Operator(Operator::Plus)) => parse(this, PRECEDENCE_UNARY)?,
                Some(Token::Operator(Operator::Not)) => {
                    Expression::Unary(UnaryOp::Not, Box::new(parse(this, PRECEDENCE_NOT)?))
                }
                _ => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            };
            while let Some(Token::Operator(op)) = this.peek() {
                let op_precedence = Expression::op_precedence(*op);
                if op_precedence == 0 || op_precedence < precedence {
                    break;
                }
                let op = *op;
                this.next();
                // ^ binds tighter than a leading minus on its right: 2^-1
                let rhs = if op == Operator::Caret {
                    match this.peek() {
                        Some(Token::Operator(Operator::Minus)) => {
                            this.next();
                            Expression::Unary(
                                UnaryOp::Negate,
                                Box::new(parse(this, op_precedence + 1)?),
                            )
                        }
                        _ => parse(this, op_precedence + 1)?,
                    }
                } else {
                    parse(this, op_precedence + 1)?
                };
                lhs = Expression::for_binary_op(op, lhs, rhs);
            }
            Ok(lhs)
        }
        parse(self, PRECEDENCE_OR)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn printer_list(&mut self) -> Result<(Vec<Expression>, bool)> {
        let mut v: Vec<Expression> = vec![];
        let mut linefeed = true;
        loop {
            match self.peek() {
                None | Some(Token::Colon) => return Ok((v, linefeed)),
                Some(Token::Semicolon) | Some(Token::Comma) => {
                    linefeed = false;
                    self.next();
                }
                _ => {
                    linefeed = true;
                    v.push(self.expression()?);
                }
            };
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        match self.next() {
            Some(Token::Ident(i)) => Ok(i.clone()),
            _ => Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let name: Rc<str> = self.ident()?.name().into();
        match self.peek() {
            Some(Token::LParen) => Ok(Variable::Array(name, self.expression_list()?)),
            _ => Ok(Variable::Unary(name)),
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn line_number(&mut self) -> Result<LineNumber> {
        match self.next() {
            Some(token) => LineNumber::try_from(token),
            None => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn line_number_list(&mut self) -> Result<Vec<LineNumber>> {
        let mut v = vec![self.line_number()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.line_number()?);
        }
        Ok(v)
    }

    fn optional_line_number(&mut self) -> Result<Option<LineNumber>> {
        match self.peek() {
            Some(Token::Literal(_)) => Ok(Some(self.line_number()?)),
            _ => Ok(None),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Unknown(_) | Whitespace(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Word(_) | Function(_) => "EXPECTED RESERVED WORD",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Colon => "EXPECTED COLON",
                Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Binary(BinaryOp::Power, lhs, rhs),
            Multiply => Expression::Binary(BinaryOp::Multiply, lhs, rhs),
            Divide => Expression::Binary(BinaryOp::Divide, lhs, rhs),
            Plus => Expression::Binary(BinaryOp::Add, lhs, rhs),
            Minus => Expression::Binary(BinaryOp::Subtract, lhs, rhs),
            And => Expression::Binary(BinaryOp::And, lhs, rhs),
            Or => Expression::Binary(BinaryOp::Or, lhs, rhs),
            Equal => Expression::Comparison(CompareOp::Equal, lhs, rhs),
            NotEqual => Expression::Comparison(CompareOp::NotEqual, lhs, rhs),
            Less => Expression::Comparison(CompareOp::Less, lhs, rhs),
            LessEqual => Expression::Comparison(CompareOp::LessEqual, lhs, rhs),
            Greater => Expression::Comparison(CompareOp::Greater, lhs, rhs),
            GreaterEqual => Expression::Comparison(CompareOp::GreaterEqual, lhs, rhs),
            Not => unreachable!("NOT is prefix only"),
        }
    }

    fn op_precedence(op: Operator) -> usize {
        use Operator::*;
        match op {
            Or => PRECEDENCE_OR,
            And => PRECEDENCE_AND,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 4,
            Plus | Minus => 5,
            Multiply | Divide => 6,
            Caret => 8,
            Not => 0,
        }
    }

    fn for_literal(lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Number(s) if s == "." => Ok(Expression::Number(0.0)),
            Literal::Number(s) => match s.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Expression::Number(n)),
                Ok(_) => Err(error!(Overflow)),
                Err(_) => Err(error!(SyntaxError; "INVALID NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(s.as_str().into())),
        }
    }

    fn for_data_item(item: &DataItem) -> Expression {
        match item {
            DataItem::Quoted(s) => Expression::String(s.as_str().into()),
            DataItem::Bare(s) => match s.parse::<f64>() {
                Ok(n) if n.is_finite() => Expression::Number(n),
                _ => Expression::String(s.as_str().into()),
            },
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        use Word::*;
        match word {
            Data => Self::r#data(parse),
            Def => Self::r#def(parse),
            Dim => Self::r#dim(parse),
            End => Ok(Statement::End),
            For => Self::r#for(parse),
            Go => {
                parse.expect(Token::Word(To))?;
                Ok(Statement::Goto(parse.line_number()?))
            }
            Gosub => Ok(Statement::Gosub(parse.line_number()?)),
            Goto => Ok(Statement::Goto(parse.line_number()?)),
            If => Self::r#if(parse),
            Input => Self::r#input(parse),
            Let => Self::r#let(parse),
            On => Self::r#on(parse),
            Print1 | Print2 => {
                let (items, newline) = parse.printer_list()?;
                Ok(Statement::Print(items, newline))
            }
            Read => Ok(Statement::Read(parse.variable_list()?)),
            Rem => {
                while parse.peek().is_some() {
                    parse.next();
                }
                Ok(Statement::Rem)
            }
            Restore => Ok(Statement::Restore(parse.optional_line_number()?)),
            Return => Ok(Statement::Return),
            Run => Ok(Statement::Run(parse.optional_line_number()?)),
            Stop => Ok(Statement::Stop),
            Next => {
                let mut v = Self::r#next(parse)?;
                if v.len() != 1 {
                    return Err(error!(SyntaxError; "ONE NEXT VARIABLE ONLY"));
                }
                Ok(v.remove(0))
            }
            Fn | Step | Then | To => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn r#data(parse: &mut Parser) -> Result<Statement> {
        match parse.peek() {
            Some(Token::Unknown(raw)) => {
                parse.next();
                let items = split_data(raw);
                Ok(Statement::Data(
                    items.iter().map(Expression::for_data_item).collect(),
                ))
            }
            _ => Ok(Statement::Data(vec![Expression::String("".into())])),
        }
    }

    fn r#def(parse: &mut Parser) -> Result<Statement> {
        parse.expect(Token::Word(Word::Fn))?;
        let name = match parse.ident()? {
            Ident::Plain(s) => format!("FN{}", s),
            Ident::String(_) => return Err(error!(SyntaxError; "FN MUST BE NUMERIC")),
        };
        parse.expect(Token::LParen)?;
        let param = match parse.ident()? {
            Ident::Plain(s) => s,
            Ident::String(_) => return Err(error!(SyntaxError; "PARAMETER MUST BE NUMERIC")),
        };
        parse.expect(Token::RParen)?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let body = parse.expression()?;
        Ok(Statement::Def(
            name.as_str().into(),
            param.as_str().into(),
            Rc::new(body),
        ))
    }

    fn r#dim(parse: &mut Parser) -> Result<Statement> {
        let vars = parse.variable_list()?;
        if vars.iter().any(|v| matches!(v, Variable::Unary(_))) {
            return Err(error!(SyntaxError; "NOT AN ARRAY"));
        }
        Ok(Statement::Dim(vars))
    }

    fn r#for(parse: &mut Parser) -> Result<Statement> {
        let name = match parse.ident()? {
            Ident::Plain(s) => s,
            Ident::String(_) => return Err(error!(TypeMismatch)),
        };
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(name.as_str().into(), from, to, step))
    }

    fn r#if(parse: &mut Parser) -> Result<Statement> {
        let predicate = parse.expression()?;
        let then = match parse.next() {
            Some(Token::Word(Word::Then)) => match parse.peek() {
                Some(Token::Literal(Literal::Number(_))) => {
                    Statement::Goto(parse.line_number()?)
                }
                _ => parse.statement()?,
            },
            Some(Token::Word(Word::Goto)) => Statement::Goto(parse.line_number()?),
            _ => return Err(error!(SyntaxError; "EXPECTED THEN OR GOTO")),
        };
        Ok(Statement::If(predicate, Box::new(then)))
    }

    fn r#input(parse: &mut Parser) -> Result<Statement> {
        let prompt = match parse.peek() {
            Some(Token::Literal(Literal::String(s))) => {
                parse.next();
                parse.expect(Token::Semicolon)?;
                Some(s.as_str().into())
            }
            _ => None,
        };
        Ok(Statement::Input(prompt, parse.variable_list()?))
    }

    fn r#let(parse: &mut Parser) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(match var {
            Variable::Unary(name) => Statement::Let(name, expr),
            Variable::Array(name, indices) => Statement::ArraySet(name, indices, expr),
        })
    }

    fn r#next(parse: &mut Parser) -> Result<Vec<Statement>> {
        match parse.peek() {
            Some(Token::Ident(_)) => {}
            _ => return Ok(vec![Statement::Next(None)]),
        }
        let mut v = vec![];
        loop {
            let name: Rc<str> = parse.ident()?.name().into();
            v.push(Statement::Next(Some(name)));
            match parse.peek() {
                Some(Token::Comma) => {
                    parse.next();
                }
                _ => return Ok(v),
            }
        }
    }

    fn r#on(parse: &mut Parser) -> Result<Statement> {
        let selector = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Goto)) => {
                Ok(Statement::OnGoto(selector, parse.line_number_list()?))
            }
            Some(Token::Word(Word::Gosub)) => {
                Ok(Statement::OnGosub(selector, parse.line_number_list()?))
            }
            _ => Err(error!(SyntaxError; "EXPECTED GOTO OR GOSUB")),
        }
    }
}

#[cfg(test)]
#[path = "tests/parse_test.rs"]
mod tests;
