use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use lotto_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::LottoFeed,
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    tasks, utils,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let ledger_service = LedgerService::new(pool.clone());

    // 可选的 CSV 引导导入 (幂等, 重复行自动跳过)
    if let Some(csv_path) = &config.bootstrap.csv_path {
        match std::fs::read_to_string(csv_path) {
            Ok(content) => {
                let parsed = utils::parse_draws_csv(&content);
                match ledger_service.import_batch(parsed.draws).await {
                    Ok((imported, skipped)) => log::info!(
                        "CSV bootstrap complete: imported {imported}, skipped {}",
                        skipped + parsed.skipped
                    ),
                    Err(e) => log::error!("CSV bootstrap failed: {e:?}"),
                }
            }
            Err(e) => log::error!("Failed to read bootstrap CSV {csv_path}: {e}"),
        }
    }

    let feed = LottoFeed::new(config.feed.clone());
    let stats_service = StatsService::new(ledger_service.clone());
    let prediction_service = PredictionService::new(stats_service.clone());
    let reconcile_service = ReconcileService::new(ledger_service.clone(), feed);

    // 启动后台定时对账任务
    tasks::spawn_all(reconcile_service.clone(), config.reconcile.interval_secs);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let admin_config = config.admin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(admin_config.clone()))
            .app_data(web::Data::new(ledger_service.clone()))
            .app_data(web::Data::new(stats_service.clone()))
            .app_data(web::Data::new(prediction_service.clone()))
            .app_data(web::Data::new(reconcile_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::draws_config)
                    .configure(handlers::statistics_config)
                    .configure(handlers::predictions_config)
                    .configure(handlers::reconcile_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
