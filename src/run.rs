//! 单次运行的编排
//!
//! 仿真阶段：控制通道建立、握手门控后的策略注入、流量与监控；
//! 归约阶段：在最终快照上依次执行分类、指标、聚合与报表输出，只执行一次。

use crate::config::{ConfigError, RunConfig};
use crate::error::Error;
use crate::flow::{FiveTuple, FlowId, FlowSnapshot, FlowStatsSource};
use crate::net::{ChannelEstablished, NetWorld, Network, NetworkOpts, Stats};
use crate::policy::{InstallVideoPolicy, PolicyDecision, PolicyInjector};
use crate::qos::{FlowCategory, FlowClassifier, QosMetrics, reduce};
use crate::report::{ReportEmitter, ReportError};
use crate::scenario::Scenario;
use crate::sim::{SimTime, Simulator};
use crate::traffic::install_traffic;
use serde::Serialize;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tracing::info;

/// 仿真阶段的产物
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub scenario: Scenario,
    pub snapshot: FlowSnapshot,
    /// 仿真在注入时刻之前结束时为 None
    pub decision: Option<PolicyDecision>,
    pub decided_at: Option<SimTime>,
    pub policy_submissions: u32,
    pub stats: Stats,
    pub end: SimTime,
    pub events: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    pub flow_id: FlowId,
    pub tuple: FiveTuple,
    pub category: FlowCategory,
    /// 1 起始的 UE 编号
    pub ue: Option<usize>,
    pub metrics: QosMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriberSummary {
    pub ue: usize,
    pub address: Ipv4Addr,
    pub vip: bool,
    pub sender_dump: String,
    pub receiver_dump: String,
    pub video_flows: usize,
    pub throughput_mbps: f64,
}

/// 一次运行的 JSON 摘要
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: Scenario,
    pub prefix: String,
    pub scheduler: &'static str,
    pub policy: Option<PolicyDecision>,
    pub network: Option<Stats>,
    pub video_throughput_mbps: f64,
    pub flows: Vec<FlowSummary>,
    pub subscribers: Vec<SubscriberSummary>,
    pub files: Vec<PathBuf>,
}

/// 运行仿真直到 `sim_time`，返回最终流快照与策略决策
pub fn simulate(cfg: &RunConfig) -> Result<SimulationOutput, ConfigError> {
    let scenario = cfg.validate()?;
    let subscribers = cfg.subscribers();
    info!(
        %scenario,
        scheduler = scenario.scheduler().name(),
        ues = subscribers.len(),
        backhaul_bps = cfg.backhaul_rate_bps(scenario),
        "开始场景仿真"
    );

    let mut sim = Simulator::default();
    let mut world = NetWorld::new(Network::new(&NetworkOpts::from_config(cfg, scenario)));

    // 交换机与控制器在 t=0 声明连接；真实通道在 channel_setup 之后才可用
    sim.schedule(cfg.channel_setup(), ChannelEstablished);
    sim.schedule(
        cfg.handshake_delay(),
        InstallVideoPolicy {
            injector: PolicyInjector {
                scenario,
                dp_id: cfg.dp_id,
                video_port: cfg.video_port_base,
            },
        },
    );
    let apps = install_traffic(&mut sim, cfg, scenario, &subscribers);
    info!(apps, "应用已安装");

    sim.run_until(cfg.sim_time(), &mut world);

    Ok(SimulationOutput {
        scenario,
        snapshot: world.net.monitor.snapshot(),
        decision: world.gate.decision(),
        decided_at: world.gate.decided_at(),
        policy_submissions: world.gate.submissions(),
        stats: world.net.stats,
        end: sim.now(),
        events: sim.executed_events(),
    })
}

/// 对任意流快照执行归约并写出报表
pub fn report_flows<S>(
    cfg: &RunConfig,
    scenario: Scenario,
    source: &S,
    out_dir: &Path,
) -> Result<RunSummary, ReportError>
where
    S: FlowStatsSource + ?Sized,
{
    let subscribers = cfg.subscribers();
    let classifier = FlowClassifier::from_config(cfg);
    let report = reduce(source, &classifier);
    let files = ReportEmitter::new(out_dir, scenario, subscribers.clone()).emit(&report)?;

    let flows = report
        .flows
        .iter()
        .map(|f| FlowSummary {
            flow_id: f.flow.record.flow_id,
            tuple: f.flow.record.tuple,
            category: f.flow.category,
            ue: f.flow.subscriber.map(|i| i + 1),
            metrics: f.metrics,
        })
        .collect();
    let subscribers = subscribers
        .iter()
        .map(|ue| SubscriberSummary {
            ue: ue.label(),
            address: ue.addr,
            vip: ue.vip,
            sender_dump: ue.sender_dump_name(scenario),
            receiver_dump: ue.receiver_dump_name(scenario),
            video_flows: report.totals.video_flows.get(ue.index).copied().unwrap_or(0),
            throughput_mbps: report.totals.get(ue.index).unwrap_or(0.0),
        })
        .collect();

    Ok(RunSummary {
        scenario,
        prefix: scenario.prefix(),
        scheduler: scenario.scheduler().name(),
        policy: None,
        network: None,
        video_throughput_mbps: report.video_throughput_mbps(),
        flows,
        subscribers,
        files,
    })
}

/// 仿真 + 报表
pub fn run_scenario(cfg: &RunConfig, out_dir: &Path) -> Result<(SimulationOutput, RunSummary), Error> {
    let out = simulate(cfg)?;
    let mut summary = report_flows(cfg, out.scenario, &out.snapshot, out_dir)?;
    summary.policy = out.decision;
    summary.network = Some(out.stats);
    Ok((out, summary))
}

/// 从 JSON 文件加载流快照
pub fn load_snapshot(path: &Path) -> Result<FlowSnapshot, Error> {
    let raw = fs::read_to_string(path).map_err(|source| Error::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::SnapshotParse {
        path: path.to_path_buf(),
        source,
    })
}
