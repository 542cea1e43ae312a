use serde::Deserialize;

/// `/reverse?format=jsonv2` payload. Only the fields used are decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl ReverseResponse {
    /// Display name, or `None` for errors and blank names.
    pub(crate) fn into_display_name(self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        self.display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"place_id": 1, "display_name": "München, Bayern, Deutschland"}"#, Some("München, Bayern, Deutschland"))]
    #[case(r#"{"display_name": "  Alpspitze  "}"#, Some("Alpspitze"))]
    #[case(r#"{"display_name": "   "}"#, None)]
    #[case(r#"{"error": "Unable to geocode"}"#, None)]
    #[case(r#"{}"#, None)]
    fn display_name_is_normalised(#[case] json: &str, #[case] expected: Option<&str>) {
        let response: ReverseResponse = serde_json::from_str(json).expect("valid payload");
        assert_eq!(response.into_display_name().as_deref(), expected);
    }
}
