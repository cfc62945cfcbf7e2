use actix_governor::Governor;
use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use feedrelay::{
    api, config::AppConfig, episodes, feeds, observability, security, AppState,
};
use std::io;

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "FR_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "FR_PORT", default_value_t = 8080)]
    port: u16,

    /// Run one pipeline, print its JSON to stdout and exit
    #[arg(long, value_enum)]
    once: Option<Pipeline>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pipeline {
    Feed,
    Episodes,
}

fn main() -> io::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    observability::init_logging();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let state = AppState::new(config).map_err(io::Error::other)?;

    match args.once {
        Some(pipeline) => run_once(state, pipeline),
        None => run_server(state, args.host, args.port),
    }
}

#[actix_web::main]
async fn run_once(state: AppState, pipeline: Pipeline) -> io::Result<()> {
    let result = match pipeline {
        Pipeline::Feed => feeds::aggregate(&state.http, &state.config.feeds)
            .await
            .and_then(|items| Ok(serde_json::to_string_pretty(&items)?)),
        Pipeline::Episodes => episodes::fetch_show_episodes(&state.http, &state.config.podcast)
            .await
            .and_then(|items| Ok(serde_json::to_string_pretty(&items)?)),
    };

    match result {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Pipeline failed");
            Err(io::Error::other(e.to_string()))
        }
    }
}

#[actix_web::main]
async fn run_server(state: AppState, host: String, port: u16) -> io::Result<()> {
    let rate_limiter = security::create_rate_limiter(&state.config.rate_limit).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid rate limit settings")
    })?;
    let state = web::Data::new(state);

    tracing::info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(security::cors())
            .app_data(state.clone())
            .service(api::health::routes()) // Health checks (no rate limiting)
            .service(
                web::scope("/api")
                    .wrap(Governor::new(&rate_limiter))
                    .service(api::feed::routes())
                    .service(api::episodes::routes()),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
