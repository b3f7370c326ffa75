use crate::error::GenerationError;
use crate::generator::validator::{self, ValidatorOptions};
use crate::handlers::generate::print_validation_summary;
use std::path::PathBuf;

pub fn handle_validate(
    file: PathBuf,
    no_aws_limits: bool,
    no_best_practices: bool,
    compile_check: bool,
    verbose: bool,
) -> crate::Result<()> {
    println!("🔎 Validating generated stack: {}", file.display());

    let code = std::fs::read_to_string(&file)?;
    let options = ValidatorOptions {
        compile_check,
        best_practices_check: !no_best_practices,
        aws_limits_check: !no_aws_limits,
        verbose,
    };

    let result = validator::validate_generated_code(&code, &options);
    print_validation_summary(&result);

    if result.is_valid {
        Ok(())
    } else {
        Err(GenerationError::ValidationFailed {
            error_count: result.errors.len(),
            first_error: result
                .errors
                .first()
                .cloned()
                .unwrap_or_else(|| "unknown validation error".to_string()),
        }
        .into())
    }
}
