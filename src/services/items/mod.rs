// アイテムCRUDサービス

pub mod service;
pub mod validation;

pub use service::ItemService;
pub use validation::{error_messages, field_errors, is_valid_email, validate_item};
