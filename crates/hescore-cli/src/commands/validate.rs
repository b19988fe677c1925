use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use crate::io;
use hescore::workflows::translate;
use tracing::info;

pub fn run(args: ValidateArgs) -> Result<()> {
    info!("Loading input document from {:?}", &args.input);
    let document = io::read_document(&args.input)?;

    let violations = translate::validate(&document)?;
    if violations.is_empty() {
        println!("✓ {} is valid.", args.input.display());
        return Ok(());
    }

    for violation in &violations {
        println!("{violation}");
    }
    Err(CliError::InvalidDocument {
        count: violations.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn sample_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/sample_home.json")
    }

    #[test]
    fn sample_home_is_valid() {
        assert!(run(ValidateArgs {
            input: sample_path()
        })
        .is_ok());
    }

    #[test]
    fn empty_document_reports_every_violation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"root": {"name": "HPXML"}}"#).unwrap();
        match run(ValidateArgs { input: path }) {
            Err(CliError::InvalidDocument { count }) => assert!(count > 10),
            other => panic!("expected violations, got {other:?}"),
        }
    }
}
