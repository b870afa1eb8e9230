use crate::{
    error::ParseError,
    syntax::{Array, ArrayItem, Dict, Document, Entry, Node, Scalar, Value},
};

/// Parses project text into a lossless [`Document`].
///
/// # Errors
/// Returns [`ParseError`] with a line/column position when the text does not
/// follow the property-list grammar.
pub fn parse(src: &str) -> Result<Document, ParseError> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let root = parser.node()?;
    let trailing = parser.trivia()?.to_string();
    if parser.pos < src.len() {
        let (line, column) = parser.location(parser.pos);
        return Err(ParseError::TrailingContent { line, column });
    }
    Ok(Document { root, trailing })
}

/// Deepest container nesting accepted; Xcode projects stay far below it.
pub const MAX_DEPTH: usize = 256;

/// Bytes that may appear in an unquoted string.
fn is_bare(byte: u8) -> bool {
    !byte.is_ascii_whitespace() && !b"{}();,=\"'<>".contains(&byte)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// Open dictionaries and arrays around the cursor
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some(b'/') && matches!(self.peek_at(1), Some(b'*' | b'/'))
    }

    fn location(&self, pos: usize) -> (usize, usize) {
        let before = &self.src.as_bytes()[..pos.min(self.src.len())];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |index| index + 1);
        (line, before.len() - line_start + 1)
    }

    fn eof(&self, expected: &'static str) -> ParseError {
        let (line, column) = self.location(self.pos);
        ParseError::UnexpectedEof {
            line,
            column,
            expected,
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let Some(found) = self.src.get(self.pos..).and_then(|rest| rest.chars().next()) else {
            return self.eof(expected);
        };
        let (line, column) = self.location(self.pos);
        ParseError::UnexpectedChar {
            found,
            line,
            column,
            expected,
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes whitespace and comments.
    fn trivia(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(byte), _) if byte.is_ascii_whitespace() => self.pos += 1,
                (Some(b'/'), Some(b'*')) => match self.src[self.pos + 2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => {
                        let (line, column) = self.location(self.pos);
                        return Err(ParseError::UnterminatedComment { line, column });
                    }
                },
                (Some(b'/'), Some(b'/')) => match self.src[self.pos..].find('\n') {
                    Some(end) => self.pos += end,
                    None => self.pos = self.src.len(),
                },
                _ => break,
            }
        }
        Ok(&self.src[start..self.pos])
    }

    fn node(&mut self) -> Result<Node, ParseError> {
        let leading = self.trivia()?.to_string();
        let value = self.value()?;
        Ok(Node { leading, value })
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'{') => self.nested(Self::dict).map(Value::Dict),
            Some(b'(') => self.nested(Self::array).map(Value::Array),
            Some(_) => self.scalar().map(Value::Scalar),
            None => Err(self.eof("a value")),
        }
    }

    fn nested<T>(
        &mut self,
        container: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth == MAX_DEPTH {
            let (line, column) = self.location(self.pos);
            return Err(ParseError::TooDeep { line, column });
        }
        self.depth += 1;
        let result = container(self);
        self.depth -= 1;
        result
    }

    fn dict(&mut self) -> Result<Dict, ParseError> {
        self.pos += 1;
        let mut entries = Vec::new();
        loop {
            let key_leading = self.trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Dict {
                        entries,
                        close_leading: key_leading.to_string(),
                    });
                }
                None => return Err(self.eof("'}'")),
                Some(_) => {
                    let key = self.scalar()?;
                    let eq_leading = self.trivia()?.to_string();
                    self.expect(b'=', "'='")?;
                    let value = self.node()?;
                    let semi_leading = self.trivia()?.to_string();
                    self.expect(b';', "';'")?;
                    entries.push(Entry {
                        key_leading: key_leading.to_string(),
                        key,
                        eq_leading,
                        value,
                        semi_leading,
                    });
                }
            }
        }
    }

    fn array(&mut self) -> Result<Array, ParseError> {
        self.pos += 1;
        let mut items: Vec<ArrayItem> = Vec::new();
        loop {
            let leading = self.trivia()?;
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Array {
                        items,
                        close_leading: leading.to_string(),
                    });
                }
                None => return Err(self.eof("')'")),
                Some(_) => {
                    if items.last().is_some_and(|item| item.comma_leading.is_none()) {
                        return Err(self.unexpected("',' or ')'"));
                    }
                    let value = self.value()?;
                    let after = self.trivia()?;
                    let comma_leading = if self.peek() == Some(b',') {
                        self.pos += 1;
                        Some(after.to_string())
                    } else {
                        // re-read as the trivia before ')' on the next turn
                        self.pos -= after.len();
                        None
                    };
                    items.push(ArrayItem {
                        node: Node {
                            leading: leading.to_string(),
                            value,
                        },
                        comma_leading,
                    });
                }
            }
        }
    }

    fn scalar(&mut self) -> Result<Scalar, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                loop {
                    match self.peek() {
                        Some(b'\\') => self.pos += 2,
                        Some(byte) if byte == quote => {
                            self.pos += 1;
                            break;
                        }
                        Some(_) => self.pos += 1,
                        None => {
                            let (line, column) = self.location(start);
                            return Err(ParseError::UnterminatedString { line, column });
                        }
                    }
                }
            }
            Some(b'<') => match self.src[self.pos..].find('>') {
                Some(end) => self.pos += end + 1,
                None => {
                    let (line, column) = self.location(start);
                    return Err(ParseError::UnterminatedString { line, column });
                }
            },
            Some(byte) if is_bare(byte) => {
                while self.peek().is_some_and(is_bare) && !self.at_comment() {
                    self.pos += 1;
                }
            }
            _ => return Err(self.unexpected("a string")),
        }
        Ok(Scalar::from_raw(&self.src[start..self.pos]))
    }
}
