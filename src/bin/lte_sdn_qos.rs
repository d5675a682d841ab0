//! LTE + SDN 视频 QoS 场景
//!
//! 运行一个场景（0 = baseline，1 = policy-enabled）并写出带前缀的 QoS 报表；
//! 也可以用 `--flows` 直接对已保存的流快照做归约，或用 `--compare` 对比目录中已有的两套报表。

use clap::Parser;
use lte_sdn_qos::config::RunConfig;
use lte_sdn_qos::report::{
    compare_dir, scenario_means_line, ue_comparison_line, write_comparison, write_json,
};
use lte_sdn_qos::run::{load_snapshot, report_flows, run_scenario};
use lte_sdn_qos::Error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lte_sdn_qos",
    about = "LTE 接入网 + SDN 视频优先：按场景输出每流/每 UE 的 QoS 报表"
)]
struct Args {
    /// JSON 运行参数文件（缺省字段取默认值）
    #[arg(long)]
    config: Option<PathBuf>,
    /// 0 = 不安装 SDN 规则，1 = 安装视频优先规则
    #[arg(long)]
    scenario: Option<u16>,
    #[arg(long)]
    num_ues: Option<usize>,
    /// 仿真时长（毫秒）
    #[arg(long)]
    sim_time_ms: Option<u64>,
    /// 交换机接入后等待多久再注入规则（毫秒）
    #[arg(long)]
    handshake_delay_ms: Option<u64>,
    /// 控制通道实际建立时间（毫秒）
    #[arg(long)]
    channel_setup_ms: Option<u64>,
    #[arg(long)]
    video_port_base: Option<u16>,
    #[arg(long)]
    video_rate_kbps: Option<u64>,
    /// 关闭背景流
    #[arg(long)]
    no_background: bool,
    /// 报表输出目录
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// 不仿真，直接归约该 JSON 流快照
    #[arg(long)]
    flows: Option<PathBuf>,
    /// 把仿真得到的流快照写成 JSON
    #[arg(long)]
    dump_flows: Option<PathBuf>,
    /// 运行摘要 JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// 不仿真，对比该目录中 s0_/s1_ 两套报表并写出 QoS_comparacao.{txt,json}
    #[arg(long, conflicts_with_all = ["flows", "dump_flows", "summary_json"])]
    compare: Option<PathBuf>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig, Error> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(v) = self.scenario {
            cfg.scenario = v;
        }
        if let Some(v) = self.num_ues {
            cfg.num_ues = v;
        }
        if let Some(v) = self.sim_time_ms {
            cfg.sim_time_ms = v;
        }
        if let Some(v) = self.handshake_delay_ms {
            cfg.handshake_delay_ms = v;
        }
        if let Some(v) = self.channel_setup_ms {
            cfg.channel_setup_ms = v;
        }
        if let Some(v) = self.video_port_base {
            cfg.video_port_base = v;
        }
        if let Some(v) = self.video_rate_kbps {
            cfg.video_rate_kbps = v;
        }
        if self.no_background {
            cfg.background = false;
        }
        Ok(cfg)
    }
}

fn compare(dir: &std::path::Path, cfg: &RunConfig) -> Result<(), Error> {
    let cmp = compare_dir(dir, cfg.vip_count)?;
    for m in &cmp.scenarios {
        println!("{}", scenario_means_line(m));
    }
    for row in &cmp.subscribers {
        println!("{}", ue_comparison_line(row));
    }
    let files = write_comparison(dir, &cmp)?;
    eprintln!("wrote {} comparison files to {}", files.len(), dir.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), Error> {
    let cfg = args.run_config()?;
    if let Some(dir) = &args.compare {
        return compare(dir, &cfg);
    }

    let summary = match &args.flows {
        Some(path) => {
            let scenario = cfg.validate()?;
            let snapshot = load_snapshot(path)?;
            report_flows(&cfg, scenario, &snapshot, &args.out_dir)?
        }
        None => {
            let (out, summary) = run_scenario(&cfg, &args.out_dir)?;
            if let Some(path) = &args.dump_flows {
                write_json(path, &out.snapshot)?;
                eprintln!("wrote flow snapshot to {}", path.display());
            }
            println!(
                "done @ {:?}, events={}, policy={:?}, delivered_pkts={}, dropped_pkts={}",
                out.end, out.events, out.decision, out.stats.delivered_pkts, out.stats.dropped_pkts
            );
            summary
        }
    };

    for ue in &summary.subscribers {
        println!(
            "ue{} addr={} vip={} video_thr_mbps={}",
            ue.ue, ue.address, ue.vip, ue.throughput_mbps
        );
    }

    if let Some(path) = &args.summary_json {
        write_json(path, &summary)?;
        eprintln!("wrote run summary to {}", path.display());
    }
    Ok(())
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
