use crate::errors::CircliteResult;

/// String key/value persistence, the widget's localStorage stand-in.
/// Writes are last-write-wins; no cross-process coordination is attempted.
#[cfg_attr(test, mockall::automock)]
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> CircliteResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CircliteResult<()>;
    fn remove(&self, key: &str) -> CircliteResult<()>;
}
