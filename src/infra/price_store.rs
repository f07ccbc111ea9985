use crate::app::ports::PriceStore;
use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Last seen price per product, one row per product id.
pub struct SqlitePriceStore {
    conn: Mutex<Connection>,
}

impl SqlitePriceStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS product_prices (
                product_id TEXT PRIMARY KEY,
                price      REAL,
                timestamp  INTEGER
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn last_checked_at(&self, product_id: &str) -> Result<Option<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT timestamp FROM product_prices WHERE product_id = ?1")?;
        let mut rows = stmt.query(params![product_id])?;
        if let Some(row) = rows.next()? {
            let ts: i64 = row.get(0)?;
            Ok(Some(ts))
        } else {
            Ok(None)
        }
    }
}

const UPSERT_PRICE: &str = "INSERT INTO product_prices (product_id, price, timestamp) VALUES (?1, ?2, ?3)
     ON CONFLICT(product_id) DO UPDATE SET price=excluded.price, timestamp=excluded.timestamp";

fn select_price(conn: &Connection, product_id: &str) -> Result<Option<f64>> {
    let mut stmt = conn.prepare("SELECT price FROM product_prices WHERE product_id = ?1")?;
    let mut rows = stmt.query(params![product_id])?;
    if let Some(row) = rows.next()? {
        let price: f64 = row.get(0)?;
        Ok(Some(price))
    } else {
        Ok(None)
    }
}

impl PriceStore for SqlitePriceStore {
    fn previous_price(&self, product_id: &str) -> Result<Option<f64>> {
        select_price(&self.conn(), product_id)
    }

    fn record_price(&self, product_id: &str, price: f64, timestamp: i64) -> Result<()> {
        self.conn()
            .execute(UPSERT_PRICE, params![product_id, price, timestamp])?;
        Ok(())
    }

    fn swap_price(&self, product_id: &str, price: f64, timestamp: i64) -> Result<Option<f64>> {
        // Held for the read and the write so concurrent checks see each other's prices
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let previous = select_price(&tx, product_id)?;
        tx.execute(UPSERT_PRICE, params![product_id, price, timestamp])?;
        tx.commit()?;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_previous_price() {
        let store = SqlitePriceStore::open_in_memory().unwrap();
        assert_eq!(store.previous_price("sku-1").unwrap(), None);

        store.record_price("sku-1", 20.0, 100).unwrap();
        store.record_price("sku-1", 18.5, 200).unwrap();

        assert_eq!(store.previous_price("sku-1").unwrap(), Some(18.5));
        assert_eq!(store.last_checked_at("sku-1").unwrap(), Some(200));
        assert_eq!(store.previous_price("sku-2").unwrap(), None);
    }

    #[test]
    fn swap_returns_replaced_price() {
        let store = SqlitePriceStore::open_in_memory().unwrap();
        assert_eq!(store.swap_price("sku-1", 20.0, 100).unwrap(), None);
        assert_eq!(store.swap_price("sku-1", 18.5, 200).unwrap(), Some(20.0));
        assert_eq!(store.previous_price("sku-1").unwrap(), Some(18.5));
    }

    #[test]
    fn concurrent_swaps_each_see_a_distinct_predecessor() {
        let store = std::sync::Arc::new(SqlitePriceStore::open_in_memory().unwrap());
        store.record_price("sku-1", 0.0, 0).unwrap();

        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.swap_price("sku-1", i as f64, i).unwrap())
            })
            .collect();
        let mut seen: Vec<f64> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        seen.dedup();

        // every swap replaced a different price, none read a stale one twice
        assert_eq!(seen.len(), 8);
    }
}
