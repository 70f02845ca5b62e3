use clap::Parser;
use team_board::adapters::xlsx_store::snapshot_label;
use team_board::config::{BoardConfig, Command};
use team_board::core::{BoardStore, ConfigProvider, ResponseLog, RunSummary};
use team_board::utils::{logger, validation::Validate};
use team_board::{
    BoardEngine, BoardError, BoardPipeline, CliConfig, EditEvent, LocalStorage, ResponseFile,
    TriggerDispatcher, TriggerEvent, XlsxBoardStore,
};

fn fail(e: &BoardError) -> ! {
    tracing::error!(
        "❌ team-board failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}

fn report(summary: Option<RunSummary>) {
    match summary {
        Some(summary) if summary.placeholder => {
            println!("📭 No responses yet. Placeholder board written.");
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Some(summary) => {
            println!(
                "✅ Assigned {} respondents to {} groups",
                summary.respondents, summary.groups
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        None => println!("⏭️  Event ignored, board unchanged."),
    }
}

fn build_dispatcher(
    cli: &CliConfig,
    config: &BoardConfig,
) -> TriggerDispatcher<BoardPipeline<ResponseFile<LocalStorage>, XlsxBoardStore<LocalStorage>>> {
    let source_path = config.source_path().unwrap_or_default();
    let source = ResponseFile::open(
        LocalStorage::new(".".to_string()),
        source_path,
        config.response_sheet(),
    );
    let store = XlsxBoardStore::new(LocalStorage::new(config.output_path().to_string()));

    let pipeline = match cli.seed {
        Some(seed) => BoardPipeline::with_seed(source, store, config.clone(), seed),
        None => BoardPipeline::new(source, store, config.clone()),
    };

    TriggerDispatcher::new(BoardEngine::new(pipeline), config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting team-board");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let event = match &cli.command {
        Command::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        Command::Freeze => {
            let store = XlsxBoardStore::new(LocalStorage::new(config.output_path().to_string()));
            let label = snapshot_label(config.board_sheet(), &chrono::Local::now());
            match store.snapshot_board(&label).await {
                Ok(location) => println!("🧊 Board frozen to: {}", location),
                Err(e) => fail(&e),
            }
            return Ok(());
        }
        Command::Rebuild => TriggerEvent::Manual,
        Command::Submit { .. } => TriggerEvent::FormSubmit,
        Command::Edit { sheet, row } => TriggerEvent::Edit(EditEvent {
            sheet: sheet.clone(),
            row: *row,
        }),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }
    tracing::debug!("✅ Configuration loaded and validated successfully");

    let dispatcher = build_dispatcher(&cli, &config);

    // 表單送出：先寫入回應工作表再重建
    if let Some(fields) = cli.command.response_fields() {
        let source = dispatcher.engine().pipeline().source();
        let Some(log) = source.as_log() else {
            fail(&BoardError::ConfigError {
                message: "Responses can only be appended to a CSV response sheet".to_string(),
            });
        };
        if let Err(e) = log.append_response(&fields).await {
            fail(&e);
        }
    }

    match dispatcher.dispatch(event).await {
        Ok(summary) => report(summary),
        Err(e) => fail(&e),
    }

    Ok(())
}
