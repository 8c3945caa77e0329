//! # frontdesk: Restaurant Reservation and Table Seating Service
//!
//! `frontdesk` manages a single restaurant's front of house: taking
//! reservations, validating them against business rules, and assigning them
//! to physical tables under mutual-exclusion and capacity constraints. It
//! exposes a small REST API that a dashboard calls.
//!
//! ## Overview
//!
//! A reservation moves through a fixed lifecycle: it is created `booked`,
//! becomes `seated` when bound to a table, and ends `finished` (party done)
//! or `cancelled` (never seated). The two terminal states are final; nothing
//! mutates a reservation after it reaches one. A table either references the
//! reservation currently occupying it or is free.
//!
//! ### Core components
//!
//! The **validation engine** ([`validate`]) is pure: it checks field shape
//! (phone/date/time formats, party size) and business rules (future instants
//! only, closed Tuesdays, 10:30-21:30 service window) and reports every
//! violated rule at once so the dashboard can render the full list.
//!
//! The **database layer** ([`db`]) uses the repository pattern over SQLx and
//! SQLite. Each entity has a repository handling queries and mutations; the
//! schema enforces the one-table-per-reservation invariant with a unique
//! reference from `tables` to `reservations`.
//!
//! The **seating engine** ([`seating`]) is the only writer allowed to touch
//! a reservation and a table in one logical operation. `seat` and `unseat`
//! run their read-check-write sequences inside a single transaction with a
//! guarded occupancy update, so concurrent attempts on the same table
//! resolve to one winner and a conflict, never a silent overwrite.
//!
//! The **query service** ([`queries`]) provides the dashboard projections:
//! reservations by date (excluding finished), search by phone fragment with
//! punctuation-insensitive matching, and tables with current occupancy.
//!
//! The **API layer** ([`api`]) is a thin axum surface over the above; errors
//! flow out as typed results ([`errors::Error`]) mapped to 400/404/409/500.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use frontdesk::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = frontdesk::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     frontdesk::telemetry::init_telemetry();
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The service opens (and creates, if missing) the SQLite database named by
//! `database_url` and runs migrations on startup via [`migrator`].

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod queries;
pub mod seating;
pub mod telemetry;
pub mod types;
pub mod validate;

pub use config::Config;
pub use types::{ReservationId, TableId};

use axum::Router;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// Get the frontdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the pool against the configured database and bring the schema up to
/// date.
#[instrument(skip_all)]
pub async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_with(options)
        .await?;

    migrator().run(&pool).await?;

    Ok(pool)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] opens the database, runs migrations,
///    and builds the router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        tracing::debug!("Starting frontdesk with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;

        let state = AppState { db: pool.clone() };

        let router = api::router(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(CorsLayer::permissive());

        Ok(Self { router, config, pool })
    }

    /// Consume the application, yielding the router (for tests and embedding)
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("frontdesk listening on http://{bind_addr}");

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
