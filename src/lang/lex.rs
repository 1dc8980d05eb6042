use super::{token::*, LineNumber, MAX_LINE_NUMBER};

pub fn lex(s: &str) -> (Option<LineNumber>, Vec<Token>) {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Length of the numeric literal at the start of `chars`:
/// digits, an optional fraction, and an optional signed exponent.
pub fn scan_number(chars: &[char]) -> usize {
    let mut len = 0;
    let mut decimal = false;
    let mut digits = 0;
    while let Some(&ch) = chars.get(len) {
        if is_basic_digit(ch) {
            digits += 1;
        } else if ch == '.' && !decimal {
            decimal = true;
        } else {
            break;
        }
        len += 1;
    }
    if digits == 0 && !decimal {
        return 0;
    }
    if let Some('E') | Some('e') = chars.get(len) {
        let mut exp = len + 1;
        if let Some('+') | Some('-') = chars.get(exp) {
            exp += 1;
        }
        if chars.get(exp).map_or(false, |c| is_basic_digit(*c)) {
            while chars.get(exp).map_or(false, |c| is_basic_digit(*c)) {
                exp += 1;
            }
            len = exp;
        }
    }
    len
}

/// Reads a number the way `VAL` does: leading blanks and an optional
/// sign, then as much of a numeric literal as is present.
pub fn number_prefix(s: &str) -> Option<f64> {
    let chars: Vec<char> = s.chars().filter(|c| !is_basic_whitespace(*c)).collect();
    let (negative, start) = match chars.first() {
        Some('-') => (true, 1),
        Some('+') => (false, 1),
        _ => (false, 0),
    };
    let len = scan_number(&chars[start..]);
    if len == 0 {
        return None;
    }
    let text: String = chars[start..start + len].iter().collect();
    let n = if text == "." { 0.0 } else { text.parse::<f64>().ok()? };
    Some(if negative { -n } else { n })
}

#[derive(Debug, PartialEq, Clone)]
pub enum DataItem {
    Quoted(String),
    Bare(String),
}

impl DataItem {
    pub fn text(&self) -> &str {
        match self {
            DataItem::Quoted(s) | DataItem::Bare(s) => s,
        }
    }
}

/// Splits `DATA` text or an `INPUT` reply on commas that are not
/// inside double quotes. Bare fields are trimmed, quoted ones are not.
pub fn split_data(raw: &str) -> Vec<DataItem> {
    let mut items = vec![];
    let mut field = String::new();
    let mut quoted = false;
    let mut was_quoted = false;
    for ch in raw.chars() {
        match ch {
            '"' if quoted => quoted = false,
            '"' if !was_quoted && field.trim().is_empty() => {
                field.clear();
                quoted = true;
                was_quoted = true;
            }
            ',' if !quoted => {
                items.push(data_item(&field, was_quoted));
                field.clear();
                was_quoted = false;
            }
            // anything after a closing quote is ignored
            _ if was_quoted && !quoted => {}
            _ => field.push(ch),
        }
    }
    items.push(data_item(&field, was_quoted));
    items
}

fn data_item(field: &str, quoted: bool) -> DataItem {
    if quoted {
        DataItem::Quoted(field.to_string())
    } else {
        DataItem::Bare(field.trim().to_string())
    }
}

struct BasicLexer {
    chars: Vec<char>,
    pos: usize,
    remark: bool,
    data: bool,
}

impl BasicLexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn whitespace(&mut self) -> Token {
        let mut len = 0;
        while let Some(ch) = self.peek() {
            if !is_basic_whitespace(ch) {
                break;
            }
            self.pos += 1;
            len += 1;
        }
        Token::Whitespace(len)
    }

    fn number(&mut self) -> Token {
        let len = scan_number(&self.chars[self.pos..]).max(1);
        let s: String = self.chars[self.pos..self.pos + len]
            .iter()
            .map(|c| c.to_ascii_uppercase())
            .collect();
        self.pos += len;
        Token::Literal(Literal::Number(s))
    }

    fn string(&mut self) -> Token {
        let mut s = String::new();
        self.pos += 1;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == '"' {
                break;
            }
            s.push(ch);
        }
        Token::Literal(Literal::String(s))
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if !s.is_empty() && Token::match_keyword(&self.chars[self.pos..]).is_some() {
                break;
            }
            if is_basic_alphabetic(ch) || is_basic_digit(ch) {
                s.push(ch.to_ascii_uppercase());
                self.pos += 1;
                continue;
            }
            if ch == '$' {
                s.push(ch);
                self.pos += 1;
                return Token::Ident(Ident::String(s));
            }
            break;
        }
        Token::Ident(Ident::Plain(s))
    }

    fn data_text(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut quoted = false;
        while let Some(ch) = self.peek() {
            if ch == ':' && !quoted {
                break;
            }
            if ch == '"' {
                quoted = !quoted;
            }
            s.push(ch);
            self.pos += 1;
        }
        if s.trim().is_empty() {
            None
        } else {
            Some(Token::Unknown(s))
        }
    }

    fn lex(s: &str) -> (Option<LineNumber>, Vec<Token>) {
        let s = s.trim_end_matches(|c| c == '\r' || c == '\n');
        let trimmed = s.trim_start();
        let digits = trimmed.chars().take_while(|c| is_basic_digit(*c)).count();
        let mut line_number = None;
        let mut rest = s;
        if digits > 0 {
            if let Ok(n) = trimmed[..digits].parse::<u32>() {
                if n <= MAX_LINE_NUMBER as u32 {
                    line_number = Some(n as LineNumber);
                    rest = &trimmed[digits..];
                }
            }
        }
        let mut tokens: Vec<Token> = BasicLexer {
            chars: rest.chars().collect(),
            pos: 0,
            remark: false,
            data: false,
        }
        .collect();
        BasicLexer::trim(&mut tokens);
        (line_number, tokens)
    }

    fn trim(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.first() {
            tokens.remove(0);
        }
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
    }
}

impl Iterator for BasicLexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data {
            self.data = false;
            if let Some(token) = self.data_text() {
                return Some(token);
            }
        }
        let pk = self.peek()?;
        if self.remark {
            let rest: String = self.chars[self.pos..].iter().collect();
            self.pos = self.chars.len();
            return Some(Token::Unknown(rest));
        }
        if is_basic_whitespace(pk) {
            return Some(self.whitespace());
        }
        if is_basic_digit(pk) || pk == '.' {
            return Some(self.number());
        }
        if pk == '"' {
            return Some(self.string());
        }
        if let Some((len, token)) = Token::match_keyword(&self.chars[self.pos..]) {
            self.pos += len;
            match token {
                Token::Word(Word::Rem) => self.remark = true,
                Token::Word(Word::Data) => self.data = true,
                _ => {}
            }
            return Some(token);
        }
        if is_basic_alphabetic(pk) {
            return Some(self.alphabetic());
        }
        self.pos += 1;
        Some(Token::Unknown(pk.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lex_test.rs"]
mod tests;
