mod memory_cache;
mod redis_cache;

pub use memory_cache::InMemoryStockCache;
pub use redis_cache::RedisStockCache;
