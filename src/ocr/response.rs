use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OcrLinesError, Result};

/// One `textAnnotations` entry as returned by a text-detection service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnotation {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "bounding_poly")]
    pub bounding_poly: RawPolygon,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPolygon {
    #[serde(default)]
    pub vertices: Vec<RawVertex>,
}

/// The service omits zero-valued coordinates, so both fields are optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RawVertex {
    #[serde(default, deserialize_with = "lenient_coord")]
    pub x: Option<f32>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub y: Option<f32>,
}

impl RawVertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

impl RawAnnotation {
    pub fn new(description: impl Into<String>, vertices: Vec<RawVertex>) -> Self {
        Self {
            description: Some(description.into()),
            bounding_poly: RawPolygon { vertices },
        }
    }
}

/// Anything that is not a JSON number becomes a missing coordinate.
fn lenient_coord<'de, D>(deserializer: D) -> std::result::Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|v| v as f32))
}

/// Per-response failure reported by the service in place of annotations.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
struct ResponseStatus {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl ResponseStatus {
    fn into_error(self) -> OcrLinesError {
        OcrLinesError::Service {
            code: self.code,
            message: self.message,
        }
    }
}

/// A response with no text is an empty object.
#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default, rename = "textAnnotations", alias = "text_annotations")]
    text_annotations: Vec<RawAnnotation>,
    #[serde(default)]
    error: Option<ResponseStatus>,
}

impl AnnotateResponse {
    fn into_annotations(self) -> Result<Vec<RawAnnotation>> {
        match self.error {
            Some(status) => Err(status.into_error()),
            None => Ok(self.text_annotations),
        }
    }
}

/// Top-level shapes. A lone response object must carry either its
/// annotations or an error; any other object is rejected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseDocument {
    Batch {
        responses: Vec<AnnotateResponse>,
    },
    Bare(Vec<RawAnnotation>),
    Single {
        #[serde(rename = "textAnnotations", alias = "text_annotations")]
        text_annotations: Vec<RawAnnotation>,
        #[serde(default)]
        error: Option<ResponseStatus>,
    },
    Failed {
        error: ResponseStatus,
    },
}

/// Extracts the annotations of response `index` from a response document.
///
/// Accepts a batch document (`{"responses": [...]}`), a single response
/// object, or a bare annotation array. The latter two ignore `index` beyond 0.
/// An `error` object in the selected response is returned as
/// [`OcrLinesError::Service`].
pub fn parse_response(json: &str, index: usize) -> Result<Vec<RawAnnotation>> {
    let document: ResponseDocument = serde_json::from_str(json)?;
    match document {
        ResponseDocument::Batch { mut responses } => {
            let available = responses.len();
            if index >= available {
                return Err(OcrLinesError::NoResponse { index, available });
            }
            responses.swap_remove(index).into_annotations()
        }
        ResponseDocument::Failed { error } => Err(error.into_error()),
        ResponseDocument::Single {
            text_annotations,
            error,
        } if index == 0 => AnnotateResponse {
            text_annotations,
            error,
        }
        .into_annotations(),
        ResponseDocument::Bare(annotations) if index == 0 => Ok(annotations),
        _ => Err(OcrLinesError::NoResponse {
            index,
            available: 1,
        }),
    }
}
