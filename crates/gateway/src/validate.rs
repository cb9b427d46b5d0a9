//! # リクエスト検証
//!
//! デコード済みJSON本体に対する必須フィールドの検証。
//! フィールドは存在しない場合に加え、偽値（`null`, `false`, `0`, `""`）の場合も欠落とみなす。

use serde_json::Value;

use crate::error::GatewayError;

/// 必須フィールドが全て揃っているか検証する。
///
/// 欠落したフィールドは最初の1件だけでなく全てを宣言順にエラーへ含める。
/// 本体がオブジェクトでない場合は全フィールドが欠落扱いとなる。
pub fn validate_required(body: &Value, required: &[&str]) -> Result<(), GatewayError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| !is_truthy(body.get(**field)))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::MissingFields(missing))
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegate_types::UPLOAD_REQUIRED_FIELDS;
    use serde_json::json;

    fn missing_of(body: Value) -> Vec<String> {
        match validate_required(&body, &UPLOAD_REQUIRED_FIELDS) {
            Ok(()) => vec![],
            Err(GatewayError::MissingFields(fields)) => fields,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_present() {
        assert!(missing_of(json!({"fileName": "a.txt", "fileContent": "aGVsbG8="})).is_empty());
    }

    #[test]
    fn test_reports_exactly_the_missing_fields() {
        assert_eq!(missing_of(json!({"fileName": "a.txt"})), vec!["fileContent"]);
        assert_eq!(missing_of(json!({"fileContent": "aGVsbG8="})), vec!["fileName"]);
        assert_eq!(missing_of(json!({})), vec!["fileName", "fileContent"]);
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        assert_eq!(
            missing_of(json!({"fileName": "", "fileContent": null})),
            vec!["fileName", "fileContent"]
        );
        assert_eq!(
            missing_of(json!({"fileName": 0, "fileContent": false})),
            vec!["fileName", "fileContent"]
        );
        // 真値であれば型は問わない（型検証はアップロード処理側）
        assert!(missing_of(json!({"fileName": 1, "fileContent": true})).is_empty());
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(missing_of(json!("text")), vec!["fileName", "fileContent"]);
        assert_eq!(missing_of(json!([1, 2])), vec!["fileName", "fileContent"]);
    }
}
