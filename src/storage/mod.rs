pub mod sqlite;

pub use sqlite::SettingsStore;
