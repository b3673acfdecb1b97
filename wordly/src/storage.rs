use sqlx::{migrate::MigrateDatabase, query, query_as, Pool, Sqlite, SqlitePool};

use crate::theme::Theme;

const DB_URL: &str = "sqlite://wordly.db";

const SAVED_WORDS_KEY: &str = "saved_words";
const THEME_KEY: &str = "theme";

/// Key-value persistence for the saved-word list and the theme preference.
///
/// Values are optional by design: a missing or unreadable entry falls back
/// to the default instead of surfacing an error.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize() -> sqlx::Result<Self> {
        Self::open(DB_URL).await
    }

    pub async fn open(url: &str) -> sqlx::Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePool::connect(url).await?;
        query("CREATE TABLE IF NOT EXISTS kv(key TEXT PRIMARY KEY, value TEXT NOT NULL)")
            .execute(&pool)
            .await?;
        Ok(Self { pool })
    }
}

impl Storage {
    pub async fn load_saved_words(&self) -> Vec<String> {
        let raw = match self.get(SAVED_WORDS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!("failed to read the saved word list: {error}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(words) => words,
            Err(error) => {
                tracing::warn!("ignoring a corrupt saved word list: {error}");
                Vec::new()
            }
        }
    }

    pub async fn save_saved_words(&self, words: &[String]) -> sqlx::Result<()> {
        let value =
            serde_json::to_string(words).expect("a list of strings always serializes");
        self.set(SAVED_WORDS_KEY, &value).await
    }

    pub async fn load_theme(&self) -> Theme {
        match self.get(THEME_KEY).await {
            Ok(Some(token)) => Theme::from_token(&token).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(error) => {
                tracing::warn!("failed to read the theme preference: {error}");
                Theme::default()
            }
        }
    }

    pub async fn save_theme(&self, theme: Theme) -> sqlx::Result<()> {
        self.set(THEME_KEY, theme.as_token()).await
    }

    async fn get(&self, key: &str) -> sqlx::Result<Option<String>> {
        let row: Option<(String,)> = query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> sqlx::Result<()> {
        query(
            "INSERT INTO kv(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }
}
