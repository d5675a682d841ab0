//! 报表输出
//!
//! 所有文件名都带场景前缀（`s0_` / `s1_`），两次运行的结果可以放在同一目录直接对比。

mod compare;
mod text;
mod xml;

pub use compare::{
    COMPARISON_FILE, COMPARISON_JSON_FILE, ScenarioComparison, ScenarioMeans, UeComparison,
    compare_dir, report_value, scenario_means_line, ue_comparison_line, write_comparison,
};
pub use text::{delay_line, jitter_line, loss_line, subscriber_line, throughput_line};
pub use xml::flowmonitor_xml;

use crate::qos::{FlowQos, QosReport};
use crate::scenario::{Scenario, Subscriber};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("create output dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub const THROUGHPUT_FILE: &str = "QoS_vazao.txt";
pub const LOSS_FILE: &str = "QoS_perda.txt";
pub const JITTER_FILE: &str = "QoS_jitter.txt";
pub const DELAY_FILE: &str = "QoS_delay.txt";
pub const FLOWMONITOR_FILE: &str = "QoS_flowmonitor.xml";

/// 第 `label`（1 起始）个 UE 的带宽文件名（不含前缀）
pub fn subscriber_file(label: usize) -> String {
    format!("QoS_drops_largura_ue{label}.txt")
}

/// 一个场景会写出的全部文件名
pub fn report_file_names(scenario: Scenario, num_ues: usize) -> Vec<String> {
    let prefix = scenario.prefix();
    let mut names: Vec<String> = [THROUGHPUT_FILE, LOSS_FILE, JITTER_FILE, DELAY_FILE]
        .iter()
        .map(|f| format!("{prefix}{f}"))
        .collect();
    names.extend((1..=num_ues).map(|label| format!("{prefix}{}", subscriber_file(label))));
    names.push(format!("{prefix}{FLOWMONITOR_FILE}"));
    names
}

#[derive(Debug, Clone)]
pub struct ReportEmitter {
    out_dir: PathBuf,
    scenario: Scenario,
    subscribers: Vec<Subscriber>,
}

impl ReportEmitter {
    pub fn new(out_dir: impl Into<PathBuf>, scenario: Scenario, subscribers: Vec<Subscriber>) -> Self {
        Self {
            out_dir: out_dir.into(),
            scenario,
            subscribers,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}{}", self.scenario.prefix(), name))
    }

    /// 写出全部报表文件，返回写出的路径（顺序同 `report_file_names`）
    pub fn emit(&self, report: &QosReport<'_>) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| ReportError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        let per_flow: [(&str, fn(&FlowQos<'_>) -> String); 4] = [
            (THROUGHPUT_FILE, throughput_line),
            (LOSS_FILE, loss_line),
            (JITTER_FILE, jitter_line),
            (DELAY_FILE, delay_line),
        ];
        for (name, line) in per_flow {
            let body: String = report.flows.iter().map(|f| line(f) + "\n").collect();
            written.push(write_file(&self.path(name), &body)?);
        }

        for ue in &self.subscribers {
            let thr = report.totals.get(ue.index).unwrap_or(0.0);
            let body = subscriber_line(ue.label(), thr) + "\n";
            written.push(write_file(&self.path(&subscriber_file(ue.label())), &body)?);
        }

        let xml = flowmonitor_xml(report, &self.subscribers);
        written.push(write_file(&self.path(FLOWMONITOR_FILE), &xml)?);

        info!(
            scenario = %self.scenario,
            files = written.len(),
            dir = %self.out_dir.display(),
            "📝 报表已写出"
        );
        Ok(written)
    }
}

fn write_file(path: &Path, body: &str) -> Result<PathBuf, ReportError> {
    fs::write(path, body).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// 以 JSON 写出任意可序列化对象（运行摘要、流快照）
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &json).map(|_| ())
}
