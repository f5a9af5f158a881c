//! Protocol buffer text format reader
//!
//! Schema-less: a document is read into a tree of named fields so that
//! callers pick the fields they know about and ignore the rest. Only the
//! syntax is validated here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {message}")]
pub struct TextFormatError {
    pub line: usize,
    pub message: String,
}

/// A field value: a scalar token (string contents, number, enum or bool
/// as written) or a nested message
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Message(Message),
}

/// Fields of a message in document order; repeated fields appear repeatedly
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub fields: Vec<(String, Value)>,
}

impl Message {
    /// Every value recorded under `name`
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// First value recorded under `name`
    pub fn first(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Str(String),
    Colon,
    Open(char),
    Close(char),
    ListOpen,
    ListClose,
    Separator,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> TextFormatError {
        TextFormatError {
            line: self.line,
            message: message.into(),
        }
    }

    fn tokens(mut self) -> Result<Vec<(Token, usize)>, TextFormatError> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let line = self.line;
            match c {
                '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '#' => {
                    while self.chars.next_if(|&c| c != '\n').is_some() {}
                }
                ':' | '{' | '<' | '}' | '>' | '[' | ']' | ',' | ';' => {
                    self.chars.next();
                    let token = match c {
                        ':' => Token::Colon,
                        '{' | '<' => Token::Open(c),
                        '}' | '>' => Token::Close(c),
                        '[' => Token::ListOpen,
                        ']' => Token::ListClose,
                        _ => Token::Separator,
                    };
                    tokens.push((token, line));
                }
                '"' | '\'' => {
                    self.chars.next();
                    let text = self.string(c)?;
                    tokens.push((Token::Str(text), line));
                }
                c if is_word_char(c) => {
                    let mut word = String::new();
                    while let Some(c) = self.chars.next_if(|&c| is_word_char(c)) {
                        word.push(c);
                    }
                    tokens.push((Token::Word(word), line));
                }
                other => return Err(self.error(format!("unexpected character '{other}'"))),
            }
        }
        Ok(tokens)
    }

    fn string(&mut self, quote: char) -> Result<String, TextFormatError> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(text),
                Some('\\') => {
                    let escaped = self
                        .chars
                        .next()
                        .ok_or_else(|| self.error("unterminated escape"))?;
                    match escaped {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        'r' => text.push('\r'),
                        '0'..='7' => {
                            let mut code = escaped.to_digit(8).unwrap_or(0);
                            for _ in 0..2 {
                                match self.chars.next_if(|c| c.is_digit(8)) {
                                    Some(d) => code = code * 8 + d.to_digit(8).unwrap_or(0),
                                    None => break,
                                }
                            }
                            text.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        }
                        'x' => {
                            let mut code = 0;
                            let mut digits = 0;
                            while let Some(d) = self.chars.next_if(|c| c.is_ascii_hexdigit()) {
                                code = code * 16 + d.to_digit(16).unwrap_or(0);
                                digits += 1;
                                if digits == 2 {
                                    break;
                                }
                            }
                            if digits == 0 {
                                return Err(self.error("\\x escape without digits"));
                            }
                            text.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        }
                        other => text.push(other),
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '+' | '/')
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, line)| *line)
            .unwrap_or(1)
    }

    fn error(&self, message: impl Into<String>) -> TextFormatError {
        TextFormatError {
            line: self.line(),
            message: message.into(),
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        self.pos += 1;
        token
    }

    /// Fields until `close` (or end of input when `close` is None)
    fn message(&mut self, close: Option<char>) -> Result<Message, TextFormatError> {
        let mut message = Message::default();
        loop {
            match (self.peek().cloned(), close) {
                (None, None) => return Ok(message),
                (None, Some(c)) => return Err(self.error(format!("missing '{c}'"))),
                (Some(Token::Close(c)), Some(expected)) if c == expected => {
                    self.pos += 1;
                    return Ok(message);
                }
                (Some(Token::Separator), _) => self.pos += 1,
                _ => {
                    let name = self.field_name()?;
                    for value in self.field_values()? {
                        message.fields.push((name.clone(), value));
                    }
                }
            }
        }
    }

    fn field_name(&mut self) -> Result<String, TextFormatError> {
        match self.next() {
            Some(Token::Word(name)) => Ok(name),
            // extension or Any type URL: [some.extension]
            Some(Token::ListOpen) => match (self.next(), self.next()) {
                (Some(Token::Word(name)), Some(Token::ListClose)) => Ok(format!("[{name}]")),
                _ => Err(self.error("malformed extension field name")),
            },
            Some(other) => Err(self.error(format!("expected field name, found {other:?}"))),
            None => Err(self.error("expected field name")),
        }
    }

    fn field_values(&mut self) -> Result<Vec<Value>, TextFormatError> {
        let had_colon = matches!(self.peek(), Some(Token::Colon));
        if had_colon {
            self.pos += 1;
        }
        match self.peek() {
            Some(Token::Open(_)) => Ok(vec![self.nested()?]),
            Some(Token::ListOpen) if had_colon => {
                self.pos += 1;
                let mut values = Vec::new();
                loop {
                    match self.peek() {
                        Some(Token::ListClose) => {
                            self.pos += 1;
                            return Ok(values);
                        }
                        Some(Token::Separator) => self.pos += 1,
                        Some(Token::Open(_)) => values.push(self.nested()?),
                        Some(_) => values.push(self.scalar()?),
                        None => return Err(self.error("missing ']'")),
                    }
                }
            }
            _ if had_colon => Ok(vec![self.scalar()?]),
            _ => Err(self.error("expected ':' or '{' after field name")),
        }
    }

    fn nested(&mut self) -> Result<Value, TextFormatError> {
        let close = match self.next() {
            Some(Token::Open('<')) => '>',
            _ => '}',
        };
        Ok(Value::Message(self.message(Some(close))?))
    }

    fn scalar(&mut self) -> Result<Value, TextFormatError> {
        match self.next() {
            Some(Token::Word(word)) => Ok(Value::Scalar(word)),
            Some(Token::Str(mut text)) => {
                // adjacent string literals concatenate
                while let Some(Token::Str(more)) = self.peek() {
                    text.push_str(more);
                    self.pos += 1;
                }
                Ok(Value::Scalar(text))
            }
            Some(other) => {
                self.pos -= 1;
                Err(self.error(format!("expected a value, found {other:?}")))
            }
            None => Err(self.error("expected a value")),
        }
    }
}

/// Parse a text format document into its top-level message
pub fn parse(input: &str) -> Result<Message, TextFormatError> {
    let tokens = Lexer::new(input).tokens()?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.message(None)
}
