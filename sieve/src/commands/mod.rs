// sieve/src/commands/mod.rs

pub mod clean;
pub mod query;
pub mod run;

use sieve_core::SieveError;

/// Prints a pipeline failure, with the miette diagnostic (code + help) when
/// the error carries one.
pub fn report_error(prefix: &str, err: SieveError) {
    match err {
        SieveError::Infrastructure(e) => eprintln!("{} {:?}", prefix, miette::Report::new(e)),
        SieveError::Domain(e) => eprintln!("{} {:?}", prefix, miette::Report::new(e)),
        other => eprintln!("{} {}", prefix, other),
    }
}
