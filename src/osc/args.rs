use derive_more::From;
use rosc::OscType;

use crate::error::OscError;

/// One OSC argument value, validated at construction.
///
/// The tagged-string surface only ever produces Int and Float; Str and Blob
/// are reachable through the typed API.
#[derive(Clone, Debug, PartialEq, From)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
    Blob(Vec<u8>),
}

impl From<OscArg> for OscType {
    fn from(arg: OscArg) -> OscType {
        match arg {
            OscArg::Int(value) => OscType::Int(value),
            OscArg::Float(value) => OscType::Float(value),
            OscArg::Str(value) => OscType::String(value),
            OscArg::Blob(value) => OscType::Blob(value),
        }
    }
}

impl OscArg {
    /// Parse one raw value per type tag character.
    ///
    /// The tag alphabet is `i` (int32) and `f` (float32); anything else is
    /// rejected here, before any bytes are encoded or sent.
    pub fn parse_tagged(tags: &str, values: &[String]) -> Result<Vec<OscArg>, OscError> {
        let tag_count = tags.chars().count();
        if tag_count != values.len() {
            return Err(OscError::TagArity {
                tags: tag_count,
                values: values.len(),
            });
        }
        tags.chars()
            .zip(values)
            .map(|(tag, raw)| match tag {
                'i' => raw
                    .parse::<i32>()
                    .map(OscArg::Int)
                    .map_err(|_| OscError::BadValue {
                        tag,
                        value: raw.clone(),
                    }),
                'f' => raw
                    .parse::<f32>()
                    .map(OscArg::Float)
                    .map_err(|_| OscError::BadValue {
                        tag,
                        value: raw.clone(),
                    }),
                other => Err(OscError::UnsupportedTag(other)),
            })
            .collect()
    }
}
