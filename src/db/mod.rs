pub mod kv;
pub mod preferences;
pub mod redis;

pub use self::kv::{InMemoryStore, KeyValueStore, StoreKey};
pub use self::preferences::{KvPreferenceStore, PreferenceStore};
pub use self::redis::{create_redis_client, RedisStore};
