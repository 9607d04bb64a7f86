//! 令牌持久化
//!
//! 浏览器端由 localStorage 实现，本地环境与测试使用内存实现。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 令牌存储
///
/// 写入失败不视为致命错误：会话仍然在内存中有效，只是刷新后需要重新登录。
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回是否写入成功
    fn set(&self, key: &str, value: &str) -> bool;
    /// 返回是否删除成功
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储，克隆之间共享数据
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}
