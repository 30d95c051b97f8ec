use crate::{Analysis, Result};

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert an analysis, metrics and ranking included, to JSON.
///
/// The `ranked` field is an array of `{"token", "count"}` objects in rank
/// order; an empty ranking is an empty array.
pub fn convert_to_json(analysis: &Analysis, config: &JsonConfig) -> Result<String> {
    if config.pretty {
        Ok(serde_json::to_string_pretty(analysis)?)
    } else {
        Ok(serde_json::to_string(analysis)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Analyzer;

    #[test]
    fn test_json_fields() {
        let analysis = Analyzer::new().analyze_text("中国的中国");
        let output = convert_to_json(&analysis, &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["ranked"][0]["token"], "中国");
        assert_eq!(value["ranked"][0]["count"], 2);
        assert!(value.get("total_tokens").is_some());
        assert!(value["source_url"].is_null());
    }

    #[test]
    fn test_json_pretty() {
        let analysis = Analyzer::new().analyze_text("");
        let output = convert_to_json(&analysis, &JsonConfig { pretty: true }).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("\"ranked\": []"));
    }
}
