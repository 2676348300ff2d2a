pub mod config;

use validator::ValidationErrors;

/// Flattens `validator` errors into a single user-facing message.
///
/// Field order from `validator` is not stable, so fields are sorted to keep
/// multi-error messages deterministic.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
