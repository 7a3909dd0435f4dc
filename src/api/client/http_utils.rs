//! Shared helpers for reading API response bodies.

/// Pulls a human-readable message out of an error body.
///
/// The API reports failures as `{"message": ...}` or `{"error": ...}`;
/// a non-blank `message` wins over `error`.
pub(super) fn extract_api_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };

    ["message", "error"]
        .iter()
        .find_map(|key| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|message| !message.trim().is_empty())
        })
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_api_message;

    #[rstest]
    #[case(r#"{"message":"Article not found"}"#, Some("Article not found"))]
    #[case(r#"{"error":"Invalid payload"}"#, Some("Invalid payload"))]
    #[case(r#"{"message":"first","error":"second"}"#, Some("first"))]
    #[case(r#"{"message":"  "}"#, None)]
    #[case(r#"{"message":"","error":"Invalid payload"}"#, Some("Invalid payload"))]
    #[case("<html>Bad gateway</html>", None)]
    #[case("", None)]
    fn messages_are_extracted(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_api_message(body).as_deref(), expected);
    }
}
