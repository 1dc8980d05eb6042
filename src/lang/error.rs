use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn detail(&self) -> &'static str {
        self.message
    }

    /// Attach a BASIC line number. An error that already carries one
    /// is returned unchanged so the innermost location wins.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        debug_assert!(self.message.is_empty());
        Error { message, ..self }
    }
}

/// Error numbers follow the Commodore 64 KERNAL/BASIC table where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DeviceNotPresent = 5,
    NextWithoutFor = 10,
    SyntaxError = 11,
    ReturnWithoutGosub = 12,
    OutOfData = 13,
    IllegalQuantity = 14,
    Overflow = 15,
    OutOfMemory = 16,
    UndefinedStatement = 17,
    BadSubscript = 18,
    RedimensionedArray = 19,
    DivisionByZero = 20,
    TypeMismatch = 22,
    UndefinedFunction = 27,
    Break = 30,
    StackOverflow = 40,
    InfiniteLoop = 41,
    ForWithoutNext = 42,
    InputPastEnd = 43,
}

impl ErrorCode {
    pub fn name(self) -> &'static str {
        use ErrorCode::*;
        match self {
            DeviceNotPresent => "DEVICE NOT PRESENT",
            NextWithoutFor => "NEXT WITHOUT FOR",
            SyntaxError => "SYNTAX",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",
            OutOfData => "OUT OF DATA",
            IllegalQuantity => "ILLEGAL QUANTITY",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            UndefinedStatement => "UNDEF'D STATEMENT",
            BadSubscript => "BAD SUBSCRIPT",
            RedimensionedArray => "REDIM'D ARRAY",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            UndefinedFunction => "UNDEF'D FUNCTION",
            Break => "BREAK",
            StackOverflow => "STACK OVERFLOW",
            InfiniteLoop => "INFINITE LOOP",
            ForWithoutNext => "FOR WITHOUT NEXT",
            InputPastEnd => "INPUT PAST END",
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if self.code == ErrorCode::Break {
            write!(f, "{}{}", self.code.name(), suffix)
        } else {
            write!(f, "?{} ERROR{}", self.code.name(), suffix)
        }
    }
}
