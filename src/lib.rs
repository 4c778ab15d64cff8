use std::io::Write;
use std::path::{Path, PathBuf};

pub mod error;
pub mod input;
pub mod lexer;
mod main_loop;
mod state;

use error::{Error, Result};
use input::{Input, InputRead};

/// Sentinel byte returned by the cursor once the source is exhausted.
pub const EOF: u8 = b'\0';

/// predef - single-pass #define macro substitution preprocessor
#[derive(Debug, clap::Parser, Clone)]
#[command(version, about)]
pub struct Args {
    /// Input file; its name must end in `.h` or `.cpp`.
    pub file: PathBuf,
}

fn has_source_extension(path: &Path) -> bool {
    let bytes = path.as_os_str().as_encoded_bytes();
    bytes.ends_with(b".h") || bytes.ends_with(b".cpp")
}

/// Run the preprocessor, writing substituted text to `stdout` and
/// diagnostics to `stderr`. Fatal errors are printed to `stderr` here, at
/// the single top-level handler, and returned so the caller decides the
/// exit status.
pub fn run<STDOUT: Write, STDERR: Write>(
    stdout: STDOUT,
    mut stderr: STDERR,
    args: Args,
) -> Result<()> {
    match run_impl(stdout, &mut stderr, args) {
        Ok(()) => Ok(()),
        Err(error) => {
            if let Err(error) = writeln!(stderr, "{error}") {
                return Err(error.into());
            }
            Err(error)
        }
    }
}

pub fn run_impl<STDOUT: Write, STDERR: Write>(
    mut stdout: STDOUT,
    stderr: &mut STDERR,
    args: Args,
) -> Result<()> {
    if !has_source_extension(&args.file) {
        return Err(Error::Extension(args.file));
    }

    let file = std::fs::File::open(&args.file).map_err(|error| {
        Error::Io(std::io::Error::new(
            error.kind(),
            format!("{}: {}", args.file.display(), error),
        ))
    })?;
    let input = Input::new(InputRead::File(file));

    process(input, &mut stdout, stderr)
}

/// Run the substitution pipeline over an already-opened cursor. This is
/// the embedding point: no process exit, no real streams required.
pub fn process<STDOUT: Write, STDERR: Write>(
    input: Input,
    stdout: &mut STDOUT,
    stderr: &mut STDERR,
) -> Result<()> {
    main_loop::main_loop(lexer::Lexer::new(input), stdout, stderr)
}
