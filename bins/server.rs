use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG, LOG_FORMAT and DATABASE_URL apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = server::load_config();
    let service_id = Uuid::new_v4();
    let addr = cfg.server.bind_addr();
    let db = cfg.database.target().to_string();

    std::panic::set_hook(Box::new({
        let (addr, db) = (addr.clone(), db.clone());
        move |info| {
            error!(
                service = "escola",
                event = "panic",
                %service_id,
                %addr,
                %db,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "escola", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "escola",
        event = "start",
        %service_id,
        version = env!("CARGO_PKG_VERSION"),
        %addr,
        %db,
        pool_max = cfg.database.max_connections,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "school records service starting"
    );

    // serve drains in-flight requests on Ctrl+C before returning
    match rt.block_on(server::serve(cfg)) {
        Ok(()) => {
            info!(service = "escola", event = "stop", %service_id, %addr, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "escola", event = "serve_failed", %service_id, %db, error = %e, "server exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
