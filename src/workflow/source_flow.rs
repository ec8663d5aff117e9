//! 素材处理流程 - 流程层
//!
//! 核心职责：定义"一个素材文件"的完整处理流程
//!
//! 流程顺序：
//! 1. 文档类：取文本 → 切行 → 逐行喂给组装器
//! 2. 表格类：读行 → 逐行做列映射
//!
//! 产出的都是未校验的候选题目，校验与去重在整轮层面统一做。

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::{sheet_reader, text_decoder};
use crate::models::CandidateQuestion;
use crate::services::row_mapper;
use crate::services::RecordAssembler;
use crate::utils::logging;
use crate::workflow::source_ctx::{SourceCtx, SourceKind};

/// 素材处理流程
///
/// - 编排单个素材文件从字节到候选题目的全过程
/// - 不持有任何资源，只依赖业务能力（services）
pub struct SourceFlow {
    min_option_count: usize,
    verbose_logging: bool,
}

impl SourceFlow {
    /// 创建新的素材处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            min_option_count: config.min_option_count,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一个素材文件，返回其全部候选题目
    pub async fn run(&self, ctx: &SourceCtx) -> Result<Vec<CandidateQuestion>> {
        match ctx.kind {
            SourceKind::Document => self.extract_document(ctx).await,
            SourceKind::Spreadsheet => self.extract_spreadsheet(ctx).await,
            SourceKind::Unsupported => {
                warn!("{} ⚠️ 跳过不支持的文件类型", ctx);
                Ok(Vec::new())
            }
        }
    }

    // ========== 分支 1: 文档逐行解析 ==========

    async fn extract_document(&self, ctx: &SourceCtx) -> Result<Vec<CandidateQuestion>> {
        let text = text_decoder::acquire_text(&ctx.path).await;
        if text.trim().is_empty() {
            warn!("{} ⚠️ 未取到任何文本，跳过", ctx);
            return Ok(Vec::new());
        }

        let lines = segment_lines(&text);
        info!("{} 📄 取到文本，共 {} 个非空行", ctx, lines.len());

        let mut assembler =
            RecordAssembler::new(&ctx.file_name, ctx.allow_block(), self.min_option_count)?;
        for line in &lines {
            assembler.feed(line);
        }
        let candidates = assembler.finish();

        self.log_candidates(ctx, &candidates);
        info!("{} ✓ 文档解析完成，得到 {} 个候选", ctx, candidates.len());
        Ok(candidates)
    }

    // ========== 分支 2: 表格列映射 ==========

    async fn extract_spreadsheet(&self, ctx: &SourceCtx) -> Result<Vec<CandidateQuestion>> {
        let rows = sheet_reader::read_rows(&ctx.path).await?;
        info!("{} 📊 读到 {} 个数据行", ctx, rows.len());

        let mut candidates = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            // 表头占第 1 行，数据从第 2 行起
            let row_number = i + 2;
            if let Some(candidate) = row_mapper::map_row(row, row_number, &ctx.file_name) {
                candidates.push(candidate);
            }
        }

        self.log_candidates(ctx, &candidates);
        info!("{} ✓ 表格映射完成，得到 {} 个候选", ctx, candidates.len());
        Ok(candidates)
    }

    /// 详细模式下逐条显示候选题干预览
    fn log_candidates(&self, ctx: &SourceCtx, candidates: &[CandidateQuestion]) {
        if !self.verbose_logging {
            return;
        }
        for candidate in candidates {
            info!(
                "{} 📝 候选: {}",
                ctx,
                logging::truncate_text(&candidate.question, 60)
            );
        }
    }
}

/// 切行：按换行符拆分，去首尾空白，丢弃空行
pub fn segment_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
