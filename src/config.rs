//! 运行参数
//!
//! `RunConfig` 可从 JSON 文件加载（缺省字段取默认值），再由命令行覆盖。

use crate::scenario::{Scenario, Subscriber, subscriber_table};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scenario index {0}: expected 0 (baseline) or 1 (policy-enabled)")]
    InvalidScenario(u16),
    #[error("num_ues must be at least 1")]
    NoSubscribers,
    #[error(
        "handshake delay ({handshake_ms} ms) must be earlier than video start ({video_start_ms} ms)"
    )]
    HandshakeAfterTraffic { handshake_ms: u64, video_start_ms: u64 },
    #[error("video rate {kbps} kbps does not fit in bits per second")]
    VideoRate { kbps: u64 },
    #[error("video port range starting at {base} cannot hold {count} subscribers")]
    VideoPortRange { base: u16, count: usize },
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// 0 = baseline，1 = policy-enabled
    pub scenario: u16,
    pub num_ues: usize,
    /// 前 N 个 UE 为 VIP
    pub vip_count: usize,
    pub sim_time_ms: u64,

    /// 交换机与控制器声明连接后，等待多久执行策略注入
    pub handshake_delay_ms: u64,
    /// OpenFlow 控制通道实际建立所需时间
    pub channel_setup_ms: u64,
    pub dp_id: u64,

    pub video_port_base: u16,
    pub video_start_ms: u64,
    /// 视频服务在 sim_time 之前多久停止
    pub video_stop_before_end_ms: u64,
    pub video_rate_kbps: u64,
    pub video_pkt_bytes: u32,

    pub background: bool,
    pub background_port: u16,
    pub background_start_ms: u64,
    pub background_stop_before_end_ms: u64,
    pub background_pkt_bytes: u32,
    pub background_on_ms: u64,
    pub background_off_ms: u64,
    /// 覆盖场景默认的背景速率
    pub background_rate_bps: Option<u64>,

    /// 覆盖场景默认的回程速率
    pub backhaul_rate_bps: Option<u64>,
    pub backhaul_latency_ms: u64,
    pub backhaul_queue_pkts: u64,
    /// PGW -> UE 的接入侧时延
    pub access_latency_ms: u64,
    /// UE -> 远端主机的上行时延
    pub uplink_latency_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenario: 0,
            num_ues: 8,
            vip_count: 2,
            sim_time_ms: 30_000,
            handshake_delay_ms: 500,
            channel_setup_ms: 100,
            dp_id: 1,
            video_port_base: 8000,
            video_start_ms: 5_000,
            video_stop_before_end_ms: 5_000,
            video_rate_kbps: 256,
            video_pkt_bytes: 1024,
            background: true,
            background_port: 9000,
            background_start_ms: 2_000,
            background_stop_before_end_ms: 1_000,
            background_pkt_bytes: 1200,
            background_on_ms: 1_000,
            background_off_ms: 1_000,
            background_rate_bps: None,
            backhaul_rate_bps: None,
            backhaul_latency_ms: 10,
            backhaul_queue_pkts: 100,
            access_latency_ms: 5,
            uplink_latency_ms: 15,
        }
    }
}

impl RunConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 校验参数组合并解析场景
    pub fn validate(&self) -> Result<Scenario, ConfigError> {
        let scenario = Scenario::from_index(self.scenario)?;
        if self.num_ues == 0 {
            return Err(ConfigError::NoSubscribers);
        }
        if usize::from(self.video_port_base) + self.num_ues > usize::from(u16::MAX) + 1 {
            return Err(ConfigError::VideoPortRange {
                base: self.video_port_base,
                count: self.num_ues,
            });
        }
        if self.video_rate_kbps.checked_mul(1_000).is_none() {
            return Err(ConfigError::VideoRate {
                kbps: self.video_rate_kbps,
            });
        }
        // 规则必须在它所针对的视频流出现之前安装（或被跳过）
        if self.handshake_delay_ms >= self.video_start_ms {
            return Err(ConfigError::HandshakeAfterTraffic {
                handshake_ms: self.handshake_delay_ms,
                video_start_ms: self.video_start_ms,
            });
        }
        Ok(scenario)
    }

    pub fn subscribers(&self) -> Vec<Subscriber> {
        subscriber_table(self.num_ues, self.vip_count)
    }

    pub fn sim_time(&self) -> SimTime {
        SimTime::from_millis(self.sim_time_ms)
    }

    pub fn handshake_delay(&self) -> SimTime {
        SimTime::from_millis(self.handshake_delay_ms)
    }

    pub fn channel_setup(&self) -> SimTime {
        SimTime::from_millis(self.channel_setup_ms)
    }

    pub fn video_start(&self) -> SimTime {
        SimTime::from_millis(self.video_start_ms)
    }

    pub fn video_stop(&self) -> SimTime {
        SimTime::from_millis(self.sim_time_ms.saturating_sub(self.video_stop_before_end_ms))
    }

    pub fn background_start(&self) -> SimTime {
        SimTime::from_millis(self.background_start_ms)
    }

    pub fn background_stop(&self) -> SimTime {
        SimTime::from_millis(
            self.sim_time_ms
                .saturating_sub(self.background_stop_before_end_ms),
        )
    }

    /// 视频码率（bps），超出 u64 时饱和
    pub fn video_rate_bps(&self) -> u64 {
        self.video_rate_kbps.saturating_mul(1_000)
    }

    pub fn backhaul_rate_bps(&self, scenario: Scenario) -> u64 {
        self.backhaul_rate_bps
            .unwrap_or_else(|| scenario.backhaul_rate_bps())
    }

    pub fn background_rate_bps(&self, scenario: Scenario) -> u64 {
        self.background_rate_bps
            .unwrap_or_else(|| scenario.background_rate_bps())
    }
}
