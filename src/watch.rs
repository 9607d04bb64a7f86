//! 可订阅的状态容器
//!
//! 核心层的状态保存在这里，UI 层通过 `subscribe` 把快照同步到自己的响应式信号中，
//! 核心层本身不依赖任何 UI 框架。单线程使用（浏览器事件循环）。

use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

pub struct Observable<T> {
    value: Rc<RefCell<T>>,
    listeners: Rc<RefCell<Vec<Listener<T>>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// 当前状态的快照
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// 修改状态并通知订阅者
    ///
    /// 通知在释放借用之后进行，订阅者可以安全地再次读取状态。
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut value = self.value.borrow_mut();
            let result = f(&mut value);
            (result, value.clone())
        };
        self.notify(&snapshot);
        result
    }

    /// 注册订阅者，注册时立即收到一次当前状态
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        let listener: Listener<T> = Rc::new(listener);
        let snapshot = self.get();
        listener(&snapshot);
        self.listeners.borrow_mut().push(listener);
    }

    fn notify(&self, snapshot: &T) {
        let listeners: Vec<Listener<T>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_every_update() {
        let state = Observable::new(0u32);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        state.update(|v| *v += 1);
        state.update(|v| *v += 2);

        assert_eq!(*seen.borrow(), vec![0, 1, 3]);
        assert_eq!(state.get(), 3);
    }

    #[test]
    fn listener_may_read_state_during_notify() {
        let state = Observable::new(String::from("a"));
        let reader = state.clone();
        let seen = Rc::new(RefCell::new(String::new()));

        let sink = seen.clone();
        state.subscribe(move |_| *sink.borrow_mut() = reader.get());
        state.update(|s| s.push('b'));

        assert_eq!(*seen.borrow(), "ab");
    }
}
