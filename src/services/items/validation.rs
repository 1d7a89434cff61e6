// 入力アイテムの境界バリデーション

use crate::core::{Item, ProcessingError, ProcessingResult};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

/// local@domain.tld 形式のメールアドレス
static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .map_err(|e| error!("Failed to compile email regex: {}", e))
        .ok()
});

/// メールアドレスとして妥当かどうか
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// 不正なフィールドを全て列挙する
///
/// 値が `None` のフィールドは検査しない
pub fn field_errors(item: &Item) -> Vec<ProcessingError> {
    let mut errors = Vec::new();
    if let Some(email) = item.email.as_deref() {
        if !is_valid_email(email) {
            errors.push(ProcessingError::validation("email", "invalid email address"));
        }
    }
    errors
}

/// 最初に見つかった不正フィールドをエラーとして返す
pub fn validate_item(item: &Item) -> ProcessingResult<()> {
    match field_errors(item).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// エラー一覧をレスポンス用の `"<field> Error"` 形式に変換
pub fn error_messages(errors: &[ProcessingError]) -> Vec<String> {
    errors
        .iter()
        .filter_map(|error| match error {
            ProcessingError::ValidationError { field, .. } => Some(format!("{field} Error")),
            _ => None,
        })
        .collect()
}
