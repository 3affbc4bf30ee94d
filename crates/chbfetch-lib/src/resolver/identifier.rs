use crate::error::FetchError;
use std::path::{Component, Path};

/// Recordings of patient 17 are published as `chb17a_*`, `chb17b_*`, ... but live under `chb17/`.
const PATIENT_17_MARKER: &str = "17";
const PATIENT_17_ID: &str = "chb17";

/// Derives the patient directory a recording belongs to from its file name.
///
/// Any name containing `17` maps to `chb17`; everything else maps to the text before the first `_`
/// (or the whole name when there is none).
pub fn owning_identifier(file_name: &str) -> &str {
    if file_name.contains(PATIENT_17_MARKER) {
        return PATIENT_17_ID;
    }

    file_name
        .split_once('_')
        .map_or(file_name, |(prefix, _)| prefix)
}

/// Accepts only names that are exactly one plain path component, so a manifest entry can neither
/// leave the class directory nor rewrite the landing page path.
pub fn validate_file_name(file_name: &str) -> Result<(), FetchError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == file_name => Ok(()),
        _ => Err(FetchError::InvalidFileName {
            name: file_name.to_string(),
            reason: "expected a bare file name without directories".to_string(),
        }),
    }
}
