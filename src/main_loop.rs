use std::io::Write;

use crate::error::{Error, Result};
use crate::lexer::{Lexer, TokenKind};
use crate::state::SymbolTable;

const DEFINE: &[u8] = b"#define";

/// The driver: pulls tokens until end of input, installing `#define`
/// bindings and streaming substituted text to `stdout`. Recoverable
/// diagnostics go to `stderr` and do not stop the run.
pub(crate) fn main_loop(
    mut lexer: Lexer,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let mut symbols = SymbolTable::default();

    'main_loop: loop {
        let token = lexer.next_token()?;
        match token.kind {
            TokenKind::EndOfInput => break 'main_loop,
            TokenKind::Identifier if token.text == DEFINE => {
                define_directive(&mut lexer, &mut symbols, stdout, stderr)?;
            }
            TokenKind::Identifier => {
                // One level of lookup only; the value is not re-scanned.
                let text = symbols.lookup(&token.text).unwrap_or(&token.text);
                stdout.write_all(text)?;
                stdout.write_all(b" ")?;
            }
            TokenKind::QuotedString | TokenKind::Other => {
                stdout.write_all(&token.text)?;
            }
            TokenKind::Malformed => {
                writeln!(
                    stderr,
                    "error: malformed string literal on line {}",
                    lexer.token_line()
                )?;
            }
        }
    }

    Ok(())
}

/// Handle one `#define` directive: the next identifier token is the macro
/// name and the rest of the physical line, blanks trimmed, is the value.
fn define_directive(
    lexer: &mut Lexer,
    symbols: &mut SymbolTable,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let name = lexer.next_token()?;
    match name.kind {
        TokenKind::EndOfInput => Err(Error::PrematureEof),
        TokenKind::Identifier => {
            let value = trim_leading_blanks(lexer.rest_of_line()?);
            if symbols.define(name.text.clone(), value).is_some() {
                writeln!(
                    stderr,
                    "warning: macro {} redefined",
                    String::from_utf8_lossy(&name.text)
                )?;
            }
            Ok(())
        }
        _ => {
            writeln!(
                stderr,
                "error: expected identifier after #define on line {}",
                lexer.token_line()
            )?;
            // Echo the skipped directive so source text is not silently
            // lost.
            stdout.write_all(DEFINE)?;
            if name.text == b"\n" {
                stdout.write_all(b"\n")?;
            } else {
                stdout.write_all(b" ")?;
                stdout.write_all(&name.text)?;
                stdout.write_all(&lexer.rest_of_line()?)?;
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn trim_leading_blanks(mut value: Vec<u8>) -> Vec<u8> {
    let blanks = value
        .iter()
        .take_while(|&&c| c == b' ' || c == b'\t')
        .count();
    value.drain(..blanks);
    value
}
