use anyhow::Result;

use extract_question_bank::orchestrator::App;
use extract_question_bank::utils::logging;
use extract_question_bank::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
