use crate::cli::TranslateArgs;
use crate::config::{resolve_config, resolve_tables};
use crate::error::Result;
use crate::io;
use crate::utils::progress::CliProgressHandler;
use hescore::core::collaborators::StandardCollaborators;
use hescore::engine::error::TranslationError;
use hescore::engine::progress::ProgressReporter;
use hescore::workflows;
use tracing::{error, info};

pub fn run(args: TranslateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let tables = resolve_tables(&args)?;

    info!("Loading input document from {:?}", &args.input);
    let document = io::read_document(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core translation workflow...");
    let result = workflows::translate::run(
        &document,
        &config,
        &tables,
        &StandardCollaborators,
        &reporter,
    );
    let description = match result {
        Ok(description) => description,
        Err(e) => {
            if let TranslationError::Validation(violations) = &e {
                for violation in violations {
                    eprintln!("{violation}");
                }
            } else if let Some(step) = progress_handler.pending_step() {
                error!(step, "Translation aborted.");
            }
            return Err(e.into());
        }
    };

    io::write_json(&description, args.output.as_deref(), args.pretty)?;
    if let Some(output) = &args.output {
        println!(
            "✓ Building description for '{}' written to: {}",
            description.building_id,
            output.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn sample_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/sample_home.json")
    }

    fn args(input: PathBuf, output: PathBuf) -> TranslateArgs {
        TranslateArgs {
            input,
            output: Some(output),
            config: None,
            tables: None,
            skip_validation: false,
            schema_version: None,
            pretty: true,
        }
    }

    #[test]
    fn sample_home_is_translated_to_json() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("description.json");
        run(args(sample_path(), output.clone())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["BuildingID"], "bldg1");
        assert_eq!(written["SchemaVersion"], "3.0");
    }

    #[test]
    fn schema_version_flag_is_stamped_on_the_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("description.json");
        let mut args = args(sample_path(), output.clone());
        args.schema_version = Some("3.1".to_string());
        run(args).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"3.1\""));
    }

    #[test]
    fn invalid_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.json");
        std::fs::write(&input, r#"{"root": {"name": "HPXML"}}"#).unwrap();
        let output = dir.path().join("description.json");

        let err = run(args(input, output.clone())).unwrap_err();
        assert!(matches!(
            err,
            CliError::Translation(TranslationError::Validation(_))
        ));
        assert!(!output.exists());
    }
}
