use serde::{Deserialize, Serialize};
use std::fmt;

/// User エンティティの識別子。
///
/// リーダーボードの同点タイブレークに昇順比較を使うため
/// `Ord` を実装している。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

/// Post エンティティの識別子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(String);

/// Comment エンティティの識別子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(String);

/// Like エンティティの識別子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LikeId(String);

/// KarmaTransaction エンティティの識別子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KarmaTransactionId(String);

macro_rules! impl_entity_id {
    ($name:ident) => {
        impl $name {
            /// 既存の識別子文字列から生成する。
            pub fn new(value: String) -> Result<Self, String> {
                if value.is_empty() {
                    return Err(concat!(stringify!($name), " cannot be empty").to_string());
                }
                uuid::Uuid::parse_str(&value).map_err(|err| {
                    format!(concat!("Invalid ", stringify!($name), " format: {}"), err)
                })?;
                Ok(Self(value))
            }

            /// 新規の識別子を生成する。
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

impl_entity_id!(UserId);
impl_entity_id!(PostId);
impl_entity_id!(CommentId);
impl_entity_id!(LikeId);
impl_entity_id!(KarmaTransactionId);
