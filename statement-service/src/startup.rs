use crate::config::StatementConfig;
use crate::handlers;
use crate::services::{BooksDb, LedgerDb};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: StatementConfig,
    pub ledger_db: LedgerDb,
    pub books_db: BooksDb,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: StatementConfig) -> Result<Self, AppError> {
        let ledger_db = LedgerDb::connect(
            &config.ledger.url,
            config.ledger.max_connections,
            config.ledger.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to ledger store: {}", e);
            e
        })?;

        let books_db = BooksDb::connect(
            &config.books.url,
            config.books.max_connections,
            config.books.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to books store: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            ledger_db,
            books_db,
        };

        let app = Router::new()
            .route("/api/income-statement", get(handlers::income_statement))
            .route("/api/balance-sheet", get(handlers::balance_sheet))
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .layer(middleware::from_fn(metrics_middleware))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn ledger_db(&self) -> &LedgerDb {
        &self.state.ledger_db
    }

    pub fn books_db(&self) -> &BooksDb {
        &self.state.books_db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
