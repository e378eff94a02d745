use crate::credential::ApiCredential;
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Settings slot holding the AI parser key.
const API_KEY_SLOT: &str = "ai_api_key";

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let s = Self {
            conn: Connection::open_in_memory().context("open in-memory db")?,
        };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS settings (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn get_credential(&self) -> anyhow::Result<Option<ApiCredential>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![API_KEY_SLOT],
                |row| row.get(0),
            )
            .optional()
            .context("read api key")?;
        Ok(value.and_then(ApiCredential::new))
    }

    pub fn set_credential(&self, credential: &ApiCredential) -> anyhow::Result<()> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        self.conn
            .execute(
                r#"
INSERT INTO settings(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![API_KEY_SLOT, credential.expose(), now],
            )
            .context("store api key")?;
        Ok(())
    }

    /// Returns whether a key was stored.
    pub fn clear_credential(&self) -> anyhow::Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM settings WHERE key=?1", params![API_KEY_SLOT])
            .context("clear api key")?;
        Ok(removed > 0)
    }
}
