use crate::Database;
use crate::models::{AccountRow, MessageRow};
use anyhow::Result;
use rusqlite::{Connection, Row};

const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

impl Database {
    // -- Accounts --

    pub fn username_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM account WHERE username = ?1)",
                [username],
                |row| row.get(0),
            )?;
            Ok(found)
        })
    }

    /// Insert a new account and return it with its assigned id. A duplicate
    /// username fails with a UNIQUE constraint error, see
    /// [`crate::is_unique_violation`].
    pub fn insert_account(&self, username: &str, password: &str) -> Result<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (username, password),
            )?;
            Ok(AccountRow {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    pub fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM account
                 WHERE username = ?1 AND password = ?2",
                (username, password),
                account_from_row,
            )
            .optional()
        })
    }

    pub fn account_exists(&self, account_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM account WHERE account_id = ?1)",
                [account_id],
                |row| row.get(0),
            )?;
            Ok(found)
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(MessageRow {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_string(),
                time_posted_epoch,
            })
        })
    }

    /// Every message, oldest id first. Empty when the table is empty.
    pub fn list_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"),
                rusqlite::params![],
            )
        })
    }

    pub fn get_message(&self, message_id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"),
                [message_id],
                message_from_row,
            )
            .optional()
        })
    }

    /// Returns true iff a row was removed.
    pub fn delete_message(&self, message_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(removed > 0)
        })
    }

    /// Returns true iff a matching row existed and was modified.
    pub fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                rusqlite::params![message_text, message_id],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn list_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"
                ),
                [account_id],
            )
        })
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

fn query_messages<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn insert_account_assigns_increasing_ids() {
        let db = db();
        let a = db.insert_account("alice", "pass1").unwrap();
        let b = db.insert_account("bob", "pass2").unwrap();
        assert!(a.account_id > 0);
        assert!(b.account_id > a.account_id);
        assert_eq!(db.find_account_by_credentials("alice", "pass1").unwrap(), Some(a));
    }

    #[test]
    fn duplicate_username_is_a_unique_violation() {
        let db = db();
        db.insert_account("alice", "pass1").unwrap();
        let err = db.insert_account("alice", "other").unwrap_err();
        assert!(crate::is_unique_violation(&err));
    }

    #[test]
    fn username_lookup_is_exact_match() {
        let db = db();
        db.insert_account("alice", "pass1").unwrap();
        assert!(db.username_exists("alice").unwrap());
        assert!(!db.username_exists("Alice").unwrap());
        assert!(!db.username_exists("alice ").unwrap());
    }

    #[test]
    fn credentials_must_match_both_fields() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();
        assert_eq!(db.find_account_by_credentials("alice", "pass1").unwrap(), Some(alice));
        assert_eq!(db.find_account_by_credentials("alice", "pass2").unwrap(), None);
        assert_eq!(db.find_account_by_credentials("bob", "pass1").unwrap(), None);
    }

    #[test]
    fn message_crud() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();
        assert!(db.list_messages().unwrap().is_empty());

        let msg = db.insert_message(alice.account_id, "hi", 100).unwrap();
        assert_eq!(db.get_message(msg.message_id).unwrap(), Some(msg.clone()));
        assert_eq!(db.list_messages().unwrap(), vec![msg.clone()]);

        assert!(db.update_message_text(msg.message_id, "hi!").unwrap());
        let updated = db.get_message(msg.message_id).unwrap().unwrap();
        assert_eq!(updated.message_text, "hi!");
        assert_eq!(updated.time_posted_epoch, 100);

        assert!(db.delete_message(msg.message_id).unwrap());
        assert!(!db.delete_message(msg.message_id).unwrap());
        assert!(!db.update_message_text(msg.message_id, "gone").unwrap());
        assert_eq!(db.get_message(msg.message_id).unwrap(), None);
    }

    #[test]
    fn messages_by_account_only_returns_that_author() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();
        let bob = db.insert_account("bob", "pass2").unwrap();
        db.insert_message(alice.account_id, "one", 1).unwrap();
        db.insert_message(bob.account_id, "two", 2).unwrap();
        db.insert_message(alice.account_id, "three", 3).unwrap();

        let texts: Vec<_> = db
            .list_messages_by_account(alice.account_id)
            .unwrap()
            .into_iter()
            .map(|m| m.message_text)
            .collect();
        assert_eq!(texts, ["one", "three"]);
        assert!(db.list_messages_by_account(999).unwrap().is_empty());
    }

    #[test]
    fn message_for_unknown_account_violates_foreign_key() {
        let db = db();
        assert!(!db.account_exists(42).unwrap());
        assert!(db.insert_message(42, "orphan", 1).is_err());
    }
}
