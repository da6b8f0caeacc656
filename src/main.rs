use clap::Parser;
use cosmos_autoscale::core::ConfigProvider;
use cosmos_autoscale::utils::error::ErrorSeverity;
use cosmos_autoscale::utils::{logger, validation::Validate};
use cosmos_autoscale::{
    AutoscaleError, AutoscaleSettings, Autoscaler, CliConfig, CosmosClient, ScaleDecision,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cosmos-autoscale CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match config.load_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match execute(&config, &settings).await {
        Ok(message) => {
            tracing::info!("✅ {}", message);
            println!("{}", message);
        }
        Err(e) => {
            tracing::error!(
                "❌ Autoscale failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,      // 輸入錯誤
                ErrorSeverity::Medium => 2,   // 可重試
                ErrorSeverity::High => 1,     // 服務端錯誤
                ErrorSeverity::Critical => 3, // 配置或系統錯誤
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn execute(
    config: &CliConfig,
    settings: &AutoscaleSettings,
) -> cosmos_autoscale::Result<String> {
    let client = CosmosClient::new(settings)?;
    let bounds = settings.throughput_bounds();
    let autoscaler = Autoscaler::new(client, bounds);

    if config.status {
        let current = autoscaler.current_throughput().await?;
        return Ok(format!(
            "Current throughput: {} RU/s (allowed {}..={})",
            current, bounds.min, bounds.max
        ));
    }

    // clap 已保證沒有 --status 時一定有 action
    let action = config.action.ok_or_else(|| AutoscaleError::InvalidAction {
        value: String::new(),
    })?;

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - throughput will not be changed");
        let outcome = autoscaler.plan(action).await?;
        return Ok(match outcome.decision {
            ScaleDecision::Adjust { from, to } => {
                format!("Would scale {}: {} -> {} RU/s", action, from, to)
            }
            _ => outcome.message(action.as_str()),
        });
    }

    let outcome = autoscaler.run(action).await?;
    Ok(match outcome.decision {
        ScaleDecision::Adjust { from, to } => {
            format!("Scaled {}: {} -> {} RU/s", action, from, to)
        }
        _ => outcome.message(action.as_str()),
    })
}
