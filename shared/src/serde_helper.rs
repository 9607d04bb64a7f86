//! 宽松反序列化工具
//!
//! 后端的用户对象结构比较松散：字段可能缺失、为 null 或包含前端不认识的取值。
//! 这里的函数配合 `#[serde(deserialize_with = "...")]` 使用，统一回退到默认值。

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    #[allow(dead_code)]
    Other(IgnoredAny),
}

/// 按字符串解析字段，任何无法识别的值（包括 null 和非字符串）都回退到 `T::default()`
pub fn parse_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let parsed = match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    };
    Ok(parsed.unwrap_or_default())
}

/// 把显式的 null 当作缺失处理
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
