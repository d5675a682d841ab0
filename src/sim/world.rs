//! 世界 trait
//!
//! 事件通过 `as_any_mut` 向下转型到具体的世界类型（如 `NetWorld`）。

use std::any::Any;

/// 仿真世界：持有网络、流监控与策略门控等可变状态。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
