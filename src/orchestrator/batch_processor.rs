//! 批量素材处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量素材的处理和全局状态管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、检查素材目录
//! 2. **目录扫描**：按文件名排序枚举素材（排序保证重跑时编号稳定）
//! 3. **顺序处理**：逐个素材跑 SourceFlow，单个失败不影响其余
//! 4. **整轮收尾**：统一校验去重 → 编号 → 原子落盘
//! 5. **全局统计**：汇总所有素材的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个素材的细节
//! - **确定性**：同一批素材重跑产出完全相同的题库文件
//! - **向下委托**：委托 workflow::SourceFlow 处理单个素材

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::ConfigError;
use crate::models::CandidateQuestion;
use crate::services::{index_records, BankWriter, Validator};
use crate::workflow::{SourceCtx, SourceFlow};

/// 应用主结构
pub struct App {
    config: Config,
    flow: SourceFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 素材目录必须存在，输出目录可以现建
        let assets_dir = PathBuf::from(&config.assets_dir);
        if !assets_dir.is_dir() {
            return Err(ConfigError::AssetsDirMissing { path: assets_dir }.into());
        }

        let flow = SourceFlow::new(&config);
        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 枚举所有待处理的素材
        let sources = self.scan_sources().await?;

        if sources.is_empty() {
            warn!("⚠️ 素材目录里没有找到任何文件");
        } else {
            log_sources_loaded(sources.len());
        }

        // 逐个处理素材，收集全部候选
        let (candidates, stats) = self.process_all_sources(sources).await;

        // 整轮收尾：校验去重 → 编号 → 落盘
        let mut validator = Validator::new();
        let accepted = validator.validate_all(candidates);
        let unique_stems = validator.unique_count();
        let bank = index_records(accepted);

        let writer = BankWriter::new(&self.config.output_file);
        writer.write(&bank).await?;

        // 输出最终统计
        print_final_stats(&stats, unique_stems, bank.len(), &self.config);

        Ok(())
    }

    /// 扫描素材目录
    ///
    /// 只收普通文件，并按文件名排序。排序决定了题目编号的
    /// 分配顺序，是重跑可复现的前提。
    async fn scan_sources(&self) -> Result<Vec<SourceCtx>> {
        info!("\n📁 正在扫描素材目录: {}", self.config.assets_dir);

        let mut paths: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.config.assets_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| SourceCtx::new(path, i + 1))
            .collect())
    }

    /// 顺序处理所有素材
    ///
    /// 单个素材失败只记日志并计入统计，整轮继续。
    async fn process_all_sources(
        &self,
        sources: Vec<SourceCtx>,
    ) -> (Vec<CandidateQuestion>, ProcessingStats) {
        let mut stats = ProcessingStats {
            total: sources.len(),
            ..Default::default()
        };
        let mut candidates = Vec::new();

        for ctx in &sources {
            info!("\n{}", "─".repeat(60));
            info!("{} 🚩 开始处理", ctx);

            match self.flow.run(ctx).await {
                Ok(mut extracted) => {
                    stats.success += 1;
                    stats.candidates += extracted.len();
                    candidates.append(&mut extracted);
                }
                Err(e) => {
                    error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                    stats.failed += 1;
                }
            }
        }

        (candidates, stats)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    total: usize,
    success: usize,
    failed: usize,
    candidates: usize,
}

// ========== 日志辅助函数 ==========

fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题库提取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库提取模式");
    info!("📂 素材目录: {}", config.assets_dir);
    info!("💾 输出文件: {}", config.output_file);
    info!("{}", "=".repeat(60));
}

fn log_sources_loaded(total: usize) {
    info!("✓ 找到 {} 个素材文件", total);
    info!("📋 将按文件名顺序逐个处理\n");
}

fn print_final_stats(stats: &ProcessingStats, unique_stems: usize, written: usize, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("🏁 全部素材处理完毕");
    info!(
        "📄 素材: 成功 {}/{}，失败 {}",
        stats.success, stats.total, stats.failed
    );
    info!("📝 提取候选: {} 个，唯一题干 {} 个", stats.candidates, unique_stems);
    info!("✅ 入库题目: {} 个", written);
    info!("💾 题库文件: {}", config.output_file);
    info!("{}", "=".repeat(60));
}
