//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success, output written                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad arguments, unsupported paths) |
//! | 3    | Cannot read an input or write the output       |
//! | 4    | Config file failed to parse or validate        |
//! | 5    | Input table is missing a required column       |
//!
//! On any non-zero exit no output file is written.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unsupported file extension.
pub const EXIT_USAGE: u8 = 2;

/// File could not be read, decoded, or written.
pub const EXIT_IO: u8 = 3;

/// TOML syntax/type error or failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A join-key or name column is absent from the roster or session log.
pub const EXIT_MISSING_COLUMN: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &rollcall_recon::ReconError) -> u8 {
    use rollcall_recon::ReconError;
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        ReconError::TableParse(_) => EXIT_IO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_recon::ReconError;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_IO,
            EXIT_INVALID_CONFIG,
            EXIT_MISSING_COLUMN,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn engine_errors_map() {
        let missing = ReconError::MissingColumn {
            table: "roster".into(),
            column: "Email Address".into(),
        };
        assert_eq!(recon_exit_code(&missing), EXIT_MISSING_COLUMN);
        assert_eq!(
            recon_exit_code(&ReconError::ConfigValidation("x".into())),
            EXIT_INVALID_CONFIG
        );
        assert_eq!(recon_exit_code(&ReconError::TableParse("x".into())), EXIT_IO);
    }
}
