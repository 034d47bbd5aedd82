pub mod domain;
pub mod handlers;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Thư mục log
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Tắt log SQL, giữ log ứng dụng
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Middleware log request: thời điểm (giờ VN), thời gian xử lý, kích thước trả về
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        use axum::body::to_bytes;
        use chrono::Utc;

        use crate::shared::format::format_number;

        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();

        // Đọc body để biết kích thước thật
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => {
                let duration = start.elapsed();
                let timestamp = Utc::now() + chrono::Duration::hours(7);
                println!(
                    "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                    timestamp.format("%H:%M:%S"),
                    duration.as_millis(),
                    "error",
                    parts.status.as_u16(),
                    method,
                    uri.path()
                );
                return Response::from_parts(parts, Body::default());
            }
        };

        let size = bytes.len();
        let duration = start.elapsed();
        let timestamp = Utc::now() + chrono::Duration::hours(7);

        // Xanh lam cho 200, vàng nâu cho còn lại
        let color_code = if parts.status.as_u16() == 200 {
            "36"
        } else {
            "33"
        };

        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color_code,
            timestamp.format("%H:%M:%S"),
            duration.as_millis(),
            format!("{}", format_number(size)),
            parts.status.as_u16(),
            method,
            uri.path()
        );

        Response::from_parts(parts, Body::from(bytes))
    }

    // Config rồi mới tới DB
    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // MENU ITEMS (a001)
        // ========================================
        .route(
            "/api/menu-items",
            get(handlers::a001_menu_item::list_all).post(handlers::a001_menu_item::upsert),
        )
        .route(
            "/api/menu-items/testdata",
            post(handlers::a001_menu_item::insert_test_data),
        )
        .route(
            "/api/menu-items/:id",
            get(handlers::a001_menu_item::get_by_id).delete(handlers::a001_menu_item::delete),
        )
        // ========================================
        // ORDERS (a002)
        // ========================================
        // Lookup giá cho form đơn hàng
        .route("/api/order/menu-price", get(handlers::a002_order::menu_price))
        .route(
            "/api/orders",
            get(handlers::a002_order::list_all).post(handlers::a002_order::upsert),
        )
        .route(
            "/api/orders/testdata",
            post(handlers::a002_order::insert_test_data),
        )
        .route(
            "/api/orders/:id",
            get(handlers::a002_order::get_by_id).delete(handlers::a002_order::delete),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .fallback_service(ServeDir::new("dist"));

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            tracing::error!("Failed to bind to port 3000. Error: {}", e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
