//! 运行场景与用户（UE）
//!
//! 场景在一次运行中不可变，决定调度器、回程带宽、背景流速率、是否注入策略以及输出文件前缀。

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// EPC 分配给第一个 UE 的地址（7.0.0.1 是 UE 默认网关）
pub const FIRST_UE_ADDR: Ipv4Addr = Ipv4Addr::new(7, 0, 0, 2);

/// 运行场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// 0：不安装 SDN 规则
    Baseline,
    /// 1：安装视频优先规则
    PolicyEnabled,
}

/// 回程出口的排队/调度方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// 轮询：单一 FIFO
    RoundRobin,
    /// 比例公平 + GBR 承载：两级严格优先
    ProportionalFair,
}

impl SchedulerKind {
    pub fn name(self) -> &'static str {
        match self {
            SchedulerKind::RoundRobin => "RrFfMacScheduler",
            SchedulerKind::ProportionalFair => "PfFfMacScheduler",
        }
    }
}

impl Scenario {
    /// 从命令行/配置中的数字编号解析（0 = baseline，1 = policy-enabled）
    pub fn from_index(index: u16) -> Result<Self, ConfigError> {
        match index {
            0 => Ok(Scenario::Baseline),
            1 => Ok(Scenario::PolicyEnabled),
            other => Err(ConfigError::InvalidScenario(other)),
        }
    }

    pub fn index(self) -> u16 {
        match self {
            Scenario::Baseline => 0,
            Scenario::PolicyEnabled => 1,
        }
    }

    /// 输出文件名前缀，例如 `s0_`
    pub fn prefix(self) -> String {
        format!("s{}_", self.index())
    }

    pub fn installs_policy(self) -> bool {
        matches!(self, Scenario::PolicyEnabled)
    }

    pub fn scheduler(self) -> SchedulerKind {
        match self {
            Scenario::Baseline => SchedulerKind::RoundRobin,
            Scenario::PolicyEnabled => SchedulerKind::ProportionalFair,
        }
    }

    /// PGW <-> 远端主机链路速率（bps）
    pub fn backhaul_rate_bps(self) -> u64 {
        match self {
            Scenario::Baseline => 1_000_000,
            Scenario::PolicyEnabled => 2_000_000,
        }
    }

    /// 每个 UE 的背景 On/Off 流速率（bps，开启期间）
    pub fn background_rate_bps(self) -> u64 {
        match self {
            Scenario::Baseline => 6_000_000,
            Scenario::PolicyEnabled => 4_000_000,
        }
    }

    /// VIP 用户是否拥有专用 GBR 视频承载
    pub fn has_dedicated_bearers(self) -> bool {
        matches!(self, Scenario::PolicyEnabled)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Baseline => write!(f, "baseline"),
            Scenario::PolicyEnabled => write!(f, "policy-enabled"),
        }
    }
}

/// 用户设备
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub index: usize,
    pub addr: Ipv4Addr,
    pub vip: bool,
}

impl Subscriber {
    /// 报表中使用的 1 起始编号
    pub fn label(&self) -> usize {
        self.index + 1
    }

    /// 视频 trace 基名：VIP 用 harbour，其余用 crew
    pub fn trace_basename(&self) -> &'static str {
        if self.vip { "harbour" } else { "crew" }
    }

    pub fn sender_dump_name(&self, scenario: Scenario) -> String {
        format!(
            "{}_sd_ue{}_s{}",
            self.trace_basename(),
            self.index,
            scenario.index()
        )
    }

    pub fn receiver_dump_name(&self, scenario: Scenario) -> String {
        format!(
            "{}_rd_ue{}_s{}",
            self.trace_basename(),
            self.index,
            scenario.index()
        )
    }
}

/// 按 EPC 的顺序分配 UE 地址，前 `vip_count` 个为 VIP
pub fn subscriber_table(num_ues: usize, vip_count: usize) -> Vec<Subscriber> {
    let base = u32::from(FIRST_UE_ADDR);
    (0..num_ues)
        .map(|index| Subscriber {
            index,
            addr: Ipv4Addr::from(base.wrapping_add(index as u32)),
            vip: index < vip_count,
        })
        .collect()
}
