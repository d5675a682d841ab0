//! 握手门控与一次性注入
//!
//! 状态机：`AwaitingHandshake -> Decided`（终态）。注入是尽力而为的：提交失败只记录日志，
//! 运行继续，视频流的表现退化为与 baseline 等价。

use super::rule::{ControllerTransport, PolicyRule};
use crate::net::NetWorld;
use crate::scenario::Scenario;
use crate::sim::{Event, SimTime, Simulator, World};
use serde::Serialize;
use tracing::{info, warn};

/// 注入动作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PolicyDecision {
    /// baseline：有意不注入
    Skipped,
    Installed,
    /// 传输返回了非零状态
    Failed { status: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    AwaitingHandshake,
    Decided(PolicyDecision),
}

/// 每次运行一个门控实例
#[derive(Debug, Default)]
pub struct HandshakeGate {
    state: GateState,
    decided_at: Option<SimTime>,
    submissions: u32,
}

impl HandshakeGate {
    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn decision(&self) -> Option<PolicyDecision> {
        match self.state {
            GateState::AwaitingHandshake => None,
            GateState::Decided(d) => Some(d),
        }
    }

    pub fn decided_at(&self) -> Option<SimTime> {
        self.decided_at
    }

    /// 本次运行经门控发出的提交次数（0 或 1）
    pub fn submissions(&self) -> u32 {
        self.submissions
    }
}

/// 注入器参数：持有场景、datapath id 与视频端口的副本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyInjector {
    pub scenario: Scenario,
    pub dp_id: u64,
    pub video_port: u16,
}

impl PolicyInjector {
    /// 触发一次决策。门控已是终态时不会再次提交。
    pub fn fire(
        &self,
        gate: &mut HandshakeGate,
        transport: &mut dyn ControllerTransport,
        now: SimTime,
    ) -> PolicyDecision {
        if let GateState::Decided(prev) = gate.state {
            warn!(?prev, "策略门控已决策，忽略重复触发");
            return prev;
        }

        let decision = if !self.scenario.installs_policy() {
            info!(scenario = %self.scenario, "不安装额外的 SDN 规则");
            PolicyDecision::Skipped
        } else {
            let rule = PolicyRule::video_priority(self.dp_id, self.video_port);
            gate.submissions += 1;
            let status = transport.submit(
                rule.dp_id,
                &rule.flow_match,
                &rule.actions,
                rule.priority,
            );
            if status == 0 {
                info!(dp_id = rule.dp_id, cmd = %rule.to_dpctl(), status, "📌 安装视频优先规则");
                PolicyDecision::Installed
            } else {
                warn!(dp_id = rule.dp_id, cmd = %rule.to_dpctl(), status, "视频优先规则安装失败，继续运行");
                PolicyDecision::Failed { status }
            }
        };

        gate.state = GateState::Decided(decision);
        gate.decided_at = Some(now);
        decision
    }
}

/// 事件：握手等待结束后执行一次注入决策
#[derive(Debug)]
pub struct InstallVideoPolicy {
    pub injector: PolicyInjector,
}

impl Event for InstallVideoPolicy {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let InstallVideoPolicy { injector } = *self;
        let Some(w) = world.as_any_mut().downcast_mut::<NetWorld>() else {
            warn!("world is not NetWorld, policy injection skipped");
            return;
        };
        injector.fire(&mut w.gate, &mut w.net.switch, sim.now());
    }
}
