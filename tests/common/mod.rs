#![allow(dead_code)]
use parkwatch::db;
use parkwatch::db::services::ParkingService;
use parkwatch::server::config::ServerConfig;
use parkwatch::services::clock::ManualClock;
use sea_orm::DatabaseConnection;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

pub const RATE: i64 = 20;
pub const HOUR_MS: i64 = 3_600_000;
pub const T0: i64 = 1_750_000_000_000;

/// An isolated store plus the service wired to a manual clock. The temp dir
/// lives as long as the fixture.
pub struct Fixture {
    pub dir: TempDir,
    pub db: DatabaseConnection,
    pub clock: Arc<ManualClock>,
    pub service: Arc<ParkingService>,
}

impl Fixture {
    pub fn database_path(&self) -> String {
        self.dir.path().join("parking.db").to_string_lossy().to_string()
    }

    pub fn static_dir(&self) -> String {
        self.dir.path().join("public").to_string_lossy().to_string()
    }

    pub fn router(&self) -> axum::Router {
        let config = ServerConfig {
            database_path: self.database_path(),
            static_dir: self.static_dir(),
            rate_per_hour: RATE,
            ..ServerConfig::default()
        };
        parkwatch::web::create_axum_router(
            self.db.clone(),
            self.service.clone(),
            Arc::new(config),
        )
    }
}

pub async fn setup(total_slots: i32) -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let database_path = dir.path().join("parking.db").to_string_lossy().to_string();

    let public = dir.path().join("public");
    fs::create_dir_all(&public).expect("create static dir");
    fs::write(public.join("index.html"), "<html><body>parking dashboard</body></html>")
        .expect("write index.html");
    fs::write(public.join("app.js"), "console.log('dashboard');").expect("write app.js");

    let db = db::connect(&database_path).await.expect("open store");
    db::initialize(&db, total_slots).await.expect("initialize store");

    let clock = Arc::new(ManualClock::new(T0));
    let service = Arc::new(ParkingService::new(db.clone(), clock.clone(), RATE));

    Fixture {
        dir,
        db,
        clock,
        service,
    }
}
