//! 两个场景的报表对比
//!
//! 读取同一目录下 `s0_` / `s1_` 两套文本报表，得到每个场景的逐流平均指标，
//! 以及每个 UE 在两个场景下的视频吞吐。

use super::{
    DELAY_FILE, JITTER_FILE, LOSS_FILE, ReportError, THROUGHPUT_FILE, write_file, write_json,
};
use crate::scenario::Scenario;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const COMPARISON_FILE: &str = "QoS_comparacao.txt";
pub const COMPARISON_JSON_FILE: &str = "QoS_comparacao.json";

const SUBSCRIBER_FILE_STEM: &str = "QoS_drops_largura_ue";

/// 一个场景所有流的平均 QoS
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioMeans {
    pub scenario: Scenario,
    pub flows: usize,
    pub throughput_mbps: f64,
    pub jitter_s: f64,
    pub loss_pct: f64,
    pub delay_s: f64,
}

/// 一个 UE 在两个场景下的视频吞吐；缺少该场景的文件时为 None
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UeComparison {
    pub ue: usize,
    pub vip: bool,
    pub baseline_mbps: Option<f64>,
    pub policy_mbps: Option<f64>,
}

impl UeComparison {
    pub fn delta_mbps(&self) -> Option<f64> {
        Some(self.policy_mbps? - self.baseline_mbps?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub scenarios: Vec<ScenarioMeans>,
    pub subscribers: Vec<UeComparison>,
}

/// 取一行报表中最后一个 `": "` 之后的第一个数值
pub fn report_value(line: &str) -> Option<f64> {
    let (_, tail) = line.rsplit_once(": ")?;
    tail.split_whitespace().next()?.parse().ok()
}

fn read_to_string(path: &Path) -> Result<String, ReportError> {
    fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_values(path: &Path) -> Result<Vec<f64>, ReportError> {
    let raw = read_to_string(path)?;
    let mut values = Vec::new();
    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        match report_value(line) {
            Some(v) => values.push(v),
            None => warn!(path = %path.display(), line, "无法解析的报表行，已跳过"),
        }
    }
    Ok(values)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn scenario_means(dir: &Path, scenario: Scenario) -> Result<ScenarioMeans, ReportError> {
    let prefix = scenario.prefix();
    let file = |name: &str| dir.join(format!("{prefix}{name}"));
    let throughput = read_values(&file(THROUGHPUT_FILE))?;
    Ok(ScenarioMeans {
        scenario,
        flows: throughput.len(),
        throughput_mbps: mean(&throughput),
        jitter_s: mean(&read_values(&file(JITTER_FILE))?),
        loss_pct: mean(&read_values(&file(LOSS_FILE))?),
        delay_s: mean(&read_values(&file(DELAY_FILE))?),
    })
}

/// 按 UE 编号（1 起始）读取该场景所有 `QoS_drops_largura_ue<N>.txt`
fn subscriber_totals(dir: &Path, scenario: Scenario) -> Result<BTreeMap<usize, f64>, ReportError> {
    let stem = format!("{}{SUBSCRIBER_FILE_STEM}", scenario.prefix());
    let entries = fs::read_dir(dir).map_err(|source| ReportError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut totals = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| ReportError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(label) = name
            .strip_prefix(&stem)
            .and_then(|rest| rest.strip_suffix(".txt"))
            .and_then(|n| n.parse::<usize>().ok())
        else {
            continue;
        };
        let path = entry.path();
        match read_values(&path)?.first() {
            Some(thr) => {
                totals.insert(label, *thr);
            }
            None => warn!(path = %path.display(), "UE 吞吐文件为空"),
        }
    }
    Ok(totals)
}

/// 读取目录中两个场景的报表并对比；前 `vip_count` 个 UE 标为 VIP
pub fn compare_dir(dir: &Path, vip_count: usize) -> Result<ScenarioComparison, ReportError> {
    let scenarios = [Scenario::Baseline, Scenario::PolicyEnabled];
    let mut means = Vec::with_capacity(scenarios.len());
    let mut rows: BTreeMap<usize, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for scenario in scenarios {
        means.push(scenario_means(dir, scenario)?);
        for (label, thr) in subscriber_totals(dir, scenario)? {
            let row = rows.entry(label).or_default();
            match scenario {
                Scenario::Baseline => row.0 = Some(thr),
                Scenario::PolicyEnabled => row.1 = Some(thr),
            }
        }
    }

    let subscribers = rows
        .into_iter()
        .map(|(ue, (baseline_mbps, policy_mbps))| UeComparison {
            ue,
            vip: ue <= vip_count,
            baseline_mbps,
            policy_mbps,
        })
        .collect();
    Ok(ScenarioComparison {
        scenarios: means,
        subscribers,
    })
}

/// `Scenario <idx> (<name>): flows=<n> throughput=<thr> Mbps jitter=<j> s loss=<l> % delay=<d> s`
pub fn scenario_means_line(m: &ScenarioMeans) -> String {
    format!(
        "Scenario {} ({}): flows={} throughput={} Mbps jitter={} s loss={} % delay={} s",
        m.scenario.index(),
        m.scenario,
        m.flows,
        m.throughput_mbps,
        m.jitter_s,
        m.loss_pct,
        m.delay_s
    )
}

/// `UE <label>[ (vip)]: s0=<thr> Mbps s1=<thr> Mbps`，缺失的一侧写 `-`
pub fn ue_comparison_line(row: &UeComparison) -> String {
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!(
        "UE {}{}: s0={} Mbps s1={} Mbps",
        row.ue,
        if row.vip { " (vip)" } else { "" },
        fmt(row.baseline_mbps),
        fmt(row.policy_mbps)
    )
}

/// 在 `dir` 下写出文本与 JSON 两份对比结果
pub fn write_comparison(dir: &Path, cmp: &ScenarioComparison) -> Result<Vec<PathBuf>, ReportError> {
    let mut body = String::new();
    for m in &cmp.scenarios {
        body.push_str(&scenario_means_line(m));
        body.push('\n');
    }
    for row in &cmp.subscribers {
        body.push_str(&ue_comparison_line(row));
        body.push('\n');
    }
    let text = write_file(&dir.join(COMPARISON_FILE), &body)?;
    let json = dir.join(COMPARISON_JSON_FILE);
    write_json(&json, cmp)?;

    info!(
        dir = %dir.display(),
        ues = cmp.subscribers.len(),
        "📊 场景对比已写出"
    );
    Ok(vec![text, json])
}
