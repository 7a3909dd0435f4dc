//! Output helpers shared by the CLI handlers.

use std::fs;
use std::path::Path;

use techledger::ApiError;

/// Reads a listing template from disk when a path is configured.
///
/// # Errors
///
/// Returns [`ApiError::Io`] when the file cannot be read.
pub fn load_template(path: Option<&str>) -> Result<Option<String>, ApiError> {
    let Some(template_path) = path else {
        return Ok(None);
    };

    fs::read_to_string(Path::new(template_path))
        .map(Some)
        .map_err(|error| ApiError::Io {
            message: format!("failed to read template {template_path}: {error}"),
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use techledger::ApiError;

    use super::load_template;

    #[test]
    fn no_path_means_no_template() {
        assert_eq!(load_template(None), Ok(None));
    }

    #[test]
    fn reads_configured_templates() {
        let mut file = NamedTempFile::new().expect("temp file should be created");
        write!(file, "{{{{ page }}}}").expect("template should be written");
        let path = file.path().to_str().expect("temp path should be UTF-8");

        assert_eq!(
            load_template(Some(path)),
            Ok(Some("{{ page }}".to_owned()))
        );
    }

    #[test]
    fn missing_templates_are_io_errors() {
        assert!(matches!(
            load_template(Some("/definitely/not/here.j2")),
            Err(ApiError::Io { .. })
        ));
    }
}
