//! Input language detection for prompt composition
//!
//! The detected language steers the system instruction so the model
//! answers non-code explanations in the language the user wrote in.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Cannot detect language of empty input")]
    EmptyInput,

    #[error("Unable to classify input language")]
    Unclassifiable,
}

/// Detect the language of `text` and return its ISO 639-1 code (e.g. "en").
///
/// Detection is best-effort: short or purely symbolic input may not be
/// classifiable, which surfaces as a typed error rather than a guess.
pub fn detect_language(text: &str) -> Result<String, DetectionError> {
    if text.trim().is_empty() {
        return Err(DetectionError::EmptyInput);
    }

    let info = whatlang::detect(text).ok_or(DetectionError::Unclassifiable)?;

    // whatlang reports ISO 639-3; the prompt template wants the
    // two-letter code the original API contract used.
    let code_639_3 = info.lang().code();
    let code = isolang::Language::from_639_3(code_639_3)
        .and_then(|lang| lang.to_639_1())
        .unwrap_or(code_639_3);

    Ok(code.to_string())
}
