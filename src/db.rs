use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Result};

pub type DbPool = Arc<Mutex<Connection>>;

pub fn init_db(path: impl AsRef<Path>) -> Result<DbPool> {
    let conn = Connection::open(path)?;
    migrate(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn init_memory_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()?;
    migrate(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            creation_date INTEGER NOT NULL,
            due_date INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
}
