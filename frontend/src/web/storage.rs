//! LocalStorage 令牌存储
//!
//! 直接读写原始字符串（不经过 JSON 编码），与服务端下发的令牌保持一致。

use gloo_storage::{LocalStorage, Storage};
use tabhome::TokenStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
