//! redb table definitions for the snapshot store.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "sessions.redb";

/// Session snapshot rows (`SessionSnapshot`, bincode-encoded), keyed by
/// storage key.
pub const SESSIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");
