use crate::error::{Error, Result};
use crate::input::Input;
use crate::EOF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of letters and periods, optionally starting with the `#`
    /// directive marker. `#define` itself arrives as an ordinary
    /// identifier; the driver recognizes the spelling.
    Identifier,
    /// A single- or double-quoted string, delimiters included, with
    /// escaped quotes resolved and line continuations removed.
    QuotedString,
    /// A newline (text `"\n"`) or a run of punctuation bytes. A run that
    /// ends at a blank keeps exactly one trailing space in its lexeme.
    Other,
    /// A string literal broken by a bare newline. Recoverable; scanning
    /// resumes on the following line.
    Malformed,
    EndOfInput,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Vec<u8>,
}

impl Token {
    fn new(kind: TokenKind, text: Vec<u8>) -> Self {
        Self { kind, text }
    }
}

/// Scanner states. Each `next_token` call starts in `Start` and runs the
/// machine until a token completes; a consumed comment loops back to
/// `Start` in place, so comments never surface as tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InIdentifier,
    InQuote { delim: u8 },
    InComment,
    InOther,
}

fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'#'
}

fn is_identifier(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'.'
}

fn is_quote(c: u8) -> bool {
    c == b'\'' || c == b'"'
}

/// Character-by-character tokenizer over a forward-only cursor. Needs
/// exactly one byte of pushback: ending an identifier or punctuation run
/// returns the terminating byte to the cursor so it starts the next token.
pub struct Lexer {
    input: Input,
    token_line: usize,
}

impl Lexer {
    pub fn new(input: Input) -> Self {
        Self {
            input,
            token_line: 1,
        }
    }

    /// Source line on which the most recent token started. Used for
    /// diagnostics; a string spanning lines reports its opening line.
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Consume the remainder of the current physical line, verbatim and
    /// untokenized. The driver captures `#define` replacement values this
    /// way.
    pub fn rest_of_line(&mut self) -> Result<Vec<u8>> {
        Ok(self.input.next_line()?)
    }

    /// Scan one token. Returns `EndOfInput` forever once the source is
    /// exhausted. Unterminated comments and strings at end of input are
    /// fatal; a string broken by a bare newline comes back as a
    /// recoverable `Malformed` token instead.
    pub fn next_token(&mut self) -> Result<Token> {
        let mut state = State::Start;
        let mut text: Vec<u8> = Vec::new();

        loop {
            let c = self.input.get_next_character()?;

            match state {
                State::Start => {
                    if is_blank(c) {
                        continue;
                    }
                    self.token_line = self.input.line_number;
                    if c == EOF {
                        return Ok(Token::new(TokenKind::EndOfInput, text));
                    } else if c == b'\n' {
                        return Ok(Token::new(TokenKind::Other, vec![b'\n']));
                    } else if is_identifier_start(c) {
                        text.push(c);
                        state = State::InIdentifier;
                    } else if is_quote(c) {
                        text.push(c);
                        state = State::InQuote { delim: c };
                    } else if c == b'/' && self.input.peek()? == b'*' {
                        self.input.get_next_character()?;
                        state = State::InComment;
                    } else {
                        text.push(c);
                        state = State::InOther;
                    }
                }
                State::InIdentifier => {
                    if is_identifier(c) {
                        text.push(c);
                    } else {
                        if c != EOF {
                            self.input.pushback_character(c);
                        }
                        log::trace!("identifier: {:?}", String::from_utf8_lossy(&text));
                        return Ok(Token::new(TokenKind::Identifier, text));
                    }
                }
                State::InQuote { delim } => {
                    if c == delim {
                        text.push(c);
                        return Ok(Token::new(TokenKind::QuotedString, text));
                    } else if c == b'\\' {
                        let next = self.input.peek()?;
                        if next == delim {
                            // Escaped quote: keep the quote byte only.
                            self.input.get_next_character()?;
                            text.push(delim);
                        } else if next == b'\n' {
                            // Line continuation inside the string.
                            self.input.get_next_character()?;
                        } else {
                            text.push(c);
                        }
                    } else if c == b'\n' {
                        // Newline already consumed, so the caller resumes
                        // scanning on the following line.
                        return Ok(Token::new(TokenKind::Malformed, text));
                    } else if c == EOF {
                        return Err(Error::UnterminatedString(self.token_line));
                    } else {
                        text.push(c);
                    }
                }
                State::InComment => {
                    if c == b'*' && self.input.peek()? == b'/' {
                        self.input.get_next_character()?;
                        if self.input.peek()? == b'\n' {
                            self.input.get_next_character()?;
                        }
                        log::trace!("skipped comment on line {}", self.token_line);
                        state = State::Start;
                    } else if c == EOF {
                        return Err(Error::UnterminatedComment(self.token_line));
                    }
                }
                State::InOther => {
                    if is_blank(c) {
                        // Collapse the terminating blank run to one space.
                        text.push(b' ');
                        return Ok(Token::new(TokenKind::Other, text));
                    } else if c == b'\n' || is_identifier_start(c) || is_quote(c) {
                        self.input.pushback_character(c);
                        return Ok(Token::new(TokenKind::Other, text));
                    } else if c == EOF {
                        return Ok(Token::new(TokenKind::Other, text));
                    } else {
                        text.push(c);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Lexer, Token, TokenKind};
    use crate::error::Error;
    use crate::input::Input;

    fn lexer(source: &str) -> Lexer {
        Lexer::new(Input::from_bytes(source.as_bytes().to_vec()))
    }

    fn collect(source: &str) -> Vec<Token> {
        let mut lexer = lexer(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::EndOfInput {
                return tokens;
            }
            tokens.push(token);
        }
    }

    fn token(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_identifier_ends_with_pushback() {
        assert_eq!(
            collect("foo("),
            vec![
                token(TokenKind::Identifier, "foo"),
                token(TokenKind::Other, "("),
            ]
        );
    }

    #[test]
    fn test_dotted_identifier_is_one_token() {
        assert_eq!(
            collect("list.head"),
            vec![token(TokenKind::Identifier, "list.head")]
        );
    }

    #[test]
    fn test_directive_marker_starts_identifier() {
        assert_eq!(
            collect("#define"),
            vec![token(TokenKind::Identifier, "#define")]
        );
    }

    #[test]
    fn test_newline_is_its_own_token() {
        assert_eq!(
            collect("a\nb"),
            vec![
                token(TokenKind::Identifier, "a"),
                token(TokenKind::Other, "\n"),
                token(TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn test_blanks_are_skipped() {
        assert_eq!(
            collect("  \t a"),
            vec![token(TokenKind::Identifier, "a")]
        );
    }

    #[test]
    fn test_punctuation_run_keeps_one_trailing_space() {
        assert_eq!(
            collect("+=  x"),
            vec![
                token(TokenKind::Other, "+= "),
                token(TokenKind::Identifier, "x"),
            ]
        );
    }

    #[test]
    fn test_punctuation_run_ends_at_newline() {
        assert_eq!(
            collect("++\n"),
            vec![
                token(TokenKind::Other, "++"),
                token(TokenKind::Other, "\n"),
            ]
        );
    }

    #[test]
    fn test_escaped_single_quote() {
        assert_eq!(
            collect(r"'it\'s'"),
            vec![token(TokenKind::QuotedString, "'it's'")]
        );
    }

    #[test]
    fn test_escaped_double_quote() {
        assert_eq!(
            collect(r#""say \"hi\"""#),
            vec![token(TokenKind::QuotedString, r#""say "hi"""#)]
        );
    }

    #[test]
    fn test_backslash_without_escape_is_literal() {
        assert_eq!(
            collect(r"'a\b'"),
            vec![token(TokenKind::QuotedString, r"'a\b'")]
        );
    }

    #[test]
    fn test_line_continuation_in_string() {
        assert_eq!(
            collect("'ab\\\ncd'"),
            vec![token(TokenKind::QuotedString, "'abcd'")]
        );
    }

    #[test]
    fn test_bare_newline_in_string_is_malformed() {
        let mut lexer = lexer("'abc\ndef\n");
        let bad = lexer.next_token().unwrap();
        assert_eq!(bad, token(TokenKind::Malformed, "'abc"));
        assert_eq!(lexer.token_line(), 1);
        // Scanning resumes on the following line.
        assert_eq!(
            lexer.next_token().unwrap(),
            token(TokenKind::Identifier, "def")
        );
    }

    #[test]
    fn test_comment_never_surfaces() {
        assert_eq!(
            collect("a/* hidden */b"),
            vec![
                token(TokenKind::Identifier, "a"),
                token(TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn test_comment_swallows_following_newline() {
        assert_eq!(
            collect("/* note */\nx"),
            vec![token(TokenKind::Identifier, "x")]
        );
    }

    #[test]
    fn test_comment_spans_lines() {
        assert_eq!(
            collect("/* one\ntwo\nthree */x"),
            vec![token(TokenKind::Identifier, "x")]
        );
    }

    #[test]
    fn test_unterminated_comment_is_fatal() {
        let mut lexer = lexer("/* never closed");
        assert!(matches!(
            lexer.next_token(),
            Err(Error::UnterminatedComment(1))
        ));
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let mut lexer = lexer("'abc");
        assert!(matches!(
            lexer.next_token(),
            Err(Error::UnterminatedString(1))
        ));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut lexer = lexer("");
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
        }
    }

    #[test]
    fn test_slash_without_star_is_punctuation() {
        assert_eq!(
            collect("/x"),
            vec![
                token(TokenKind::Other, "/"),
                token(TokenKind::Identifier, "x"),
            ]
        );
    }

    #[test]
    fn test_digits_belong_to_punctuation_runs() {
        assert_eq!(
            collect("x123"),
            vec![
                token(TokenKind::Identifier, "x"),
                token(TokenKind::Other, "123"),
            ]
        );
    }
}
