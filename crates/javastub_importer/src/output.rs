use javastub_model::ApiRoot;
use thiserror::Error;

use crate::config::OutputMode;
use crate::xml::{ApiXmlError, ApiXmlWriter, XmlDetail};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Xml(#[from] ApiXmlError),
    #[error("Failed to serialize API as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes `api` in the requested mode. The result always ends with a newline.
pub fn render(api: &ApiRoot, mode: OutputMode) -> Result<String, RenderError> {
    let text = match mode {
        OutputMode::Full => ApiXmlWriter::new(XmlDetail::Full).write(api)?,
        OutputMode::ParametersOnly => ApiXmlWriter::new(XmlDetail::ParametersOnly).write(api)?,
        OutputMode::Json => {
            let mut json = serde_json::to_string_pretty(api)?;
            json.push('\n');
            json
        }
    };
    Ok(text)
}
