//! Flat JSON output: one `{"text", "time"}` object per payload, in time order.

use serde::Serialize;

use super::seconds;
use crate::error::CueError;
use crate::timeline::TimedPayload;

/// One lyric event as written to the JSON document.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatLyric {
    /// Raw event text, break marker included.
    pub text: String,
    /// Seconds since the start of the song.
    pub time: f64,
}

impl From<&TimedPayload> for FlatLyric {
    fn from(timed: &TimedPayload) -> Self {
        Self {
            text: timed.payload.text.clone(),
            time: seconds(timed.time),
        }
    }
}

/// Serialize as a pretty-printed JSON array with four-space indentation.
pub fn to_json(lyrics: &[FlatLyric]) -> Result<String, CueError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    lyrics
        .serialize(&mut serializer)
        .map_err(|e| CueError::OutputError(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| CueError::OutputError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let lyrics = vec![
            FlatLyric {
                text: "Hel•".to_string(),
                time: 0.0,
            },
            FlatLyric {
                text: "lo¬".to_string(),
                time: 0.25,
            },
        ];
        let json = to_json(&lyrics).unwrap();
        let expected = "[\n    {\n        \"text\": \"Hel•\",\n        \"time\": 0.0\n    },\n    {\n        \"text\": \"lo¬\",\n        \"time\": 0.25\n    }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_json_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_json_parses_back() {
        let lyrics = vec![FlatLyric {
            text: "say \"hi\"".to_string(),
            time: 12.345678,
        }];
        let value: serde_json::Value = serde_json::from_str(&to_json(&lyrics).unwrap()).unwrap();
        assert_eq!(value[0]["text"], "say \"hi\"");
        assert_eq!(value[0]["time"], 12.345678);
    }
}
