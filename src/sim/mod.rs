//! 仿真核心模块
//!
//! 单线程、协作式的离散事件仿真：所有活动都是同一逻辑时钟上的回调。

// 子模块声明
mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
