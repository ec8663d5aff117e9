/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 素材文件存放目录（pdf / docx / txt / xlsx）
    pub assets_dir: String,
    /// 题库输出文件路径
    pub output_file: String,
    /// 候选题目收尾时的最少选项数（宽松规则，校验阶段仍要求恰好 4 个）
    pub min_option_count: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            output_file: "data/questions.json".to_string(),
            min_option_count: 2,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            assets_dir: std::env::var("ASSETS_DIR").unwrap_or(default.assets_dir),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            min_option_count: std::env::var("MIN_OPTION_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_option_count),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
