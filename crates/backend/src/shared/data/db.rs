use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let sql = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await?;
    Ok(!rows.is_empty())
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/foodshop.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Chuẩn hóa separator và dạng URL trên Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    // Bootstrap schema tối thiểu, tạo bảng nếu chưa có

    if !table_exists(&conn, "a001_menu_item").await? {
        tracing::info!("Creating a001_menu_item table");
        let create_menu_item_sql = r#"
            CREATE TABLE a001_menu_item (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                category TEXT NOT NULL DEFAULT '',
                price REAL NOT NULL DEFAULT 0,
                available INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_menu_item_sql.to_string(),
        ))
        .await?;
    }

    if !table_exists(&conn, "a002_order").await? {
        tracing::info!("Creating a002_order table");
        let create_order_sql = r#"
            CREATE TABLE a002_order (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                customer_name TEXT NOT NULL DEFAULT '',
                customer_phone TEXT NOT NULL DEFAULT '',
                order_type TEXT NOT NULL DEFAULT 'dine_in',
                table_label TEXT,
                order_status TEXT NOT NULL DEFAULT 'pending',
                payment_status TEXT NOT NULL DEFAULT 'unpaid',
                completed_at TEXT,
                items_json TEXT NOT NULL DEFAULT '[]',
                payments_json TEXT NOT NULL DEFAULT '[]',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_order_sql.to_string(),
        ))
        .await?;
    } else {
        // table_label xuất hiện sau bản đầu, bổ sung nếu DB cũ chưa có
        let pragma = format!("PRAGMA table_info('{}');", "a002_order");
        let cols = conn
            .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await?;
        let mut has_table_label = false;
        for row in cols {
            let name: String = row.try_get("", "name").unwrap_or_default();
            if name == "table_label" {
                has_table_label = true;
            }
        }
        if !has_table_label {
            tracing::info!("Adding table_label column to a002_order");
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "ALTER TABLE a002_order ADD COLUMN table_label TEXT;".to_string(),
            ))
            .await?;
        }
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
