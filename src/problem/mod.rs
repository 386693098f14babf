// Top-level error presentation for the command-line tool. Nothing here
// participates in extraction; the library reports errors as values and
// this module only decides how the binary shows them.

use owo_colors::OwoColorize;
use std::path::Path;

use crate::extract::ExtractError;

/// One-line rendition of a failure to read the input file.
pub fn concise_loading_error(filename: &Path, error: &std::io::Error) -> String {
    let problem = match error.kind() {
        std::io::ErrorKind::NotFound => "file not found".to_owned(),
        _ => error.to_string(),
    };

    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.display(),
        problem.bold()
    )
}

/// One-line rendition of a fatal extraction failure.
pub fn concise_extract_error(filename: &Path, error: &ExtractError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.display(),
        error
            .message()
            .bold()
    )
}
