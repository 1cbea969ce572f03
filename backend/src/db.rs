use anyhow::Result;
use shared::{Bill, BillStatus};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

/// Bill row created when a receipt is uploaded, before the form is submitted
#[derive(Debug, Clone, PartialEq)]
pub struct DraftBill {
    pub id: String,
    pub email: String,
    pub file_name: String,
    pub file_path: String,
    pub created_at: String,
}

/// A bill row with its submission state
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBill {
    pub bill: Bill,
    /// False while the row is a draft opened by a receipt upload
    pub submitted: bool,
}

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a private in-memory database
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bills (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                type TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL DEFAULT '',
                amount INTEGER NOT NULL DEFAULT 0,
                date TEXT NOT NULL DEFAULT '',
                vat TEXT NOT NULL DEFAULT '',
                pct INTEGER NOT NULL DEFAULT 20,
                commentary TEXT NOT NULL DEFAULT '',
                file_url TEXT,
                file_name TEXT,
                file_path TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                submitted_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bills_email
            ON bills(email);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store the draft row of a freshly uploaded receipt
    pub async fn insert_draft(&self, draft: &DraftBill) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bills (id, email, file_name, file_path, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.id)
        .bind(&draft.email)
        .bind(&draft.file_name)
        .bind(&draft.file_path)
        .bind(BillStatus::Pending.as_str())
        .bind(&draft.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// Retrieve a bill by key, drafts included
    pub async fn get_bill(&self, id: &str) -> Result<Option<StoredBill>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, type, name, amount, date, vat, pct, commentary,
                   file_url, file_name, status, submitted_at
            FROM bills
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(|r| {
            let submitted_at: Option<String> = r.get("submitted_at");
            Ok(StoredBill {
                bill: Self::bill_from_row(&r)?,
                submitted: submitted_at.is_some(),
            })
        })
        .transpose()
    }

    /// Fill in a draft from the submitted form and mark it submitted.
    /// The receipt name recorded at upload is kept. Returns false when no
    /// draft has this key.
    pub async fn submit_bill(&self, id: &str, bill: &Bill, submitted_at: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET email = ?, type = ?, name = ?, amount = ?, date = ?, vat = ?, pct = ?,
                commentary = ?, file_url = ?, status = ?, submitted_at = ?
            WHERE id = ? AND submitted_at IS NULL
            "#,
        )
        .bind(&bill.email)
        .bind(&bill.expense_type)
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(&bill.date)
        .bind(&bill.vat)
        .bind(bill.pct)
        .bind(&bill.commentary)
        .bind(&bill.file_url)
        .bind(bill.status.as_str())
        .bind(submitted_at)
        .bind(id)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List submitted bills, optionally only those of one employee
    pub async fn list_bills(&self, email: Option<&str>) -> Result<Vec<Bill>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, type, name, amount, date, vat, pct, commentary,
                   file_url, file_name, status
            FROM bills
            WHERE submitted_at IS NOT NULL
              AND (? IS NULL OR email = ?)
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(email)
        .bind(email)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(Self::bill_from_row).collect()
    }

    fn bill_from_row(row: &SqliteRow) -> Result<Bill> {
        let status: String = row.get("status");
        Ok(Bill {
            id: Some(row.get("id")),
            email: row.get("email"),
            expense_type: row.get("type"),
            name: row.get("name"),
            amount: row.get("amount"),
            date: row.get("date"),
            vat: row.get("vat"),
            pct: row.get("pct"),
            commentary: row.get("commentary"),
            file_url: row.get("file_url"),
            file_name: row.get("file_name"),
            status: BillStatus::parse(&status)?,
        })
    }
}
