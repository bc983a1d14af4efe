use std::fs;
use std::path::Path;

use thiserror::Error;

/// Marker line replaced by the report unless another one is given.
pub const DEFAULT_MARKER: &str = "% Insert Simplex Solution";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot read template {path}: {message}")]
    TemplateRead { path: String, message: String },
    #[error("Cannot write {path}: {message}")]
    OutputWrite { path: String, message: String },
    #[error("Marker line not found in template: {0}")]
    MarkerNotFound(String),
}

/// Copies `template` line by line, replacing every line equal to `marker`
/// with `body`.
pub fn substitute(template: &str, marker: &str, body: &str) -> Result<String, ReportError> {
    let mut out = String::with_capacity(template.len() + body.len());
    let mut found = false;

    for line in template.lines() {
        if line == marker {
            found = true;
            out.push_str(body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }

    if !found {
        return Err(ReportError::MarkerNotFound(marker.to_string()));
    }
    Ok(out)
}

/// Reads the template at `template_path`, substitutes `body` at the marker
/// and writes the result to `output_path`.
pub fn write_report(
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    marker: &str,
    body: &str,
) -> Result<(), ReportError> {
    let template_path = template_path.as_ref();
    let output_path = output_path.as_ref();

    let template = fs::read_to_string(template_path).map_err(|e| ReportError::TemplateRead {
        path: template_path.display().to_string(),
        message: e.to_string(),
    })?;

    let document = substitute(&template, marker, body)?;

    fs::write(output_path, document).map_err(|e| ReportError::OutputWrite {
        path: output_path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::info!(output = %output_path.display(), "report written");
    Ok(())
}
