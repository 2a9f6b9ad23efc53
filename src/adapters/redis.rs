// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis feature storage adapter.
//!
//! This module provides an adapter that persists features in Redis. The set of
//! known keys lives in `{namespace}:features` and each feature is a hash at
//! `{namespace}:feature:{key}` with the fields `name`, `description` and
//! `enabled`.
//!
//! Every operation that touches both the set and a hash runs as one Lua script,
//! so a hash never outlives its set membership.

use crate::domain::{Feature, FeatureGateError, Result};
use crate::ports::FeatureAdapter;
use redis::{Client, Commands, Connection, RedisError, Script};
use std::sync::Arc;

/// KEYS: set, hash. ARGV: key, name, description.
const ADD_SCRIPT: &str = r"
if redis.call('SADD', KEYS[1], ARGV[1]) == 1 then
  redis.call('HSET', KEYS[2], 'name', ARGV[2], 'description', ARGV[3], 'enabled', 'false')
end
return 1
";

/// KEYS: set, hash. ARGV: key.
const REMOVE_SCRIPT: &str = r"
if redis.call('SREM', KEYS[1], ARGV[1]) == 1 then
  redis.call('DEL', KEYS[2])
end
return 1
";

/// KEYS: set, hash. ARGV: key, flag. Returns 0 if the key is not a member.
const SET_ENABLED_SCRIPT: &str = r"
if redis.call('SISMEMBER', KEYS[1], ARGV[1]) == 0 then
  return 0
end
redis.call('HSET', KEYS[2], 'enabled', ARGV[2])
return 1
";

/// KEYS: set, hash. ARGV: key. Returns -1 if the key is not a member.
const IS_ENABLED_SCRIPT: &str = r"
if redis.call('SISMEMBER', KEYS[1], ARGV[1]) == 0 then
  return -1
end
if redis.call('HGET', KEYS[2], 'enabled') == 'true' then
  return 1
end
return 0
";

/// Feature adapter for Redis.
///
/// A connection is opened per operation. Enable, disable and status checks test
/// set membership inside the same script as the hash access, so a missing key
/// fails before anything is written.
///
/// # Examples
///
/// ```rust,no_run
/// use feature_gate::adapters::RedisAdapter;
/// use feature_gate::domain::Feature;
/// use feature_gate::ports::FeatureAdapter;
///
/// # fn main() -> feature_gate::domain::Result<()> {
/// let adapter = RedisAdapter::new("redis://localhost:6379", "myapp")?;
/// adapter.add(&Feature::new("Search", "search", "New search page"))?;
/// adapter.enable("search")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RedisAdapter {
    /// Redis client
    client: Arc<Client>,
    /// Prefix for every key this adapter touches
    namespace: String,
}

impl RedisAdapter {
    /// Validates namespace to prevent injection attacks
    fn validate_namespace(namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(adapter_error("Namespace must not be empty", None));
        }
        // Disallow wildcard characters and other special Redis pattern characters
        if namespace.contains(['*', '?', '[', ']', '\\']) {
            return Err(adapter_error(
                "Namespace contains invalid characters (* ? [ ] \\)",
                None,
            ));
        }
        Ok(())
    }

    /// Creates a new Redis adapter.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., `"redis://localhost:6379"`)
    /// * `namespace` - Prefix for the feature set and feature hashes
    ///
    /// No connection is made until the first operation.
    pub fn new(url: &str, namespace: &str) -> Result<Self> {
        Self::validate_namespace(namespace)?;

        let client = Client::open(url).map_err(|e| {
            adapter_error(format!("Failed to create Redis client: {}", e), Some(e))
        })?;

        Ok(Self {
            client: Arc::new(client),
            namespace: namespace.to_string(),
        })
    }

    /// Returns the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn set_key(&self) -> String {
        format!("{}:features", self.namespace)
    }

    fn feature_key(&self, key: &str) -> String {
        format!("{}:feature:{}", self.namespace, key)
    }

    fn connection(&self) -> Result<Connection> {
        self.client
            .get_connection()
            .map_err(|e| adapter_error(format!("Failed to connect to Redis: {}", e), Some(e)))
    }

    /// Runs `source` against the feature set and the hash of `key`.
    fn eval(&self, source: &str, key: &str, args: &[&str]) -> Result<i64> {
        let mut conn = self.connection()?;
        let script = Script::new(source);
        let mut invocation = script.key(self.set_key());
        invocation.key(self.feature_key(key)).arg(key);
        for arg in args {
            invocation.arg(*arg);
        }
        invocation
            .invoke(&mut conn)
            .map_err(|e| command_error("EVALSHA", e))
    }

    fn set_enabled(&self, key: &str, enabled: bool) -> Result<bool> {
        match self.eval(SET_ENABLED_SCRIPT, key, &[flag(enabled)])? {
            0 => Err(FeatureGateError::not_found(key)),
            _ => Ok(true),
        }
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

fn adapter_error(message: impl Into<String>, source: Option<RedisError>) -> FeatureGateError {
    FeatureGateError::AdapterError {
        adapter_name: "redis".to_string(),
        message: message.into(),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

fn command_error(command: &str, e: RedisError) -> FeatureGateError {
    adapter_error(format!("{} failed: {}", command, e), Some(e))
}

impl FeatureAdapter for RedisAdapter {
    fn name(&self) -> &str {
        "redis"
    }

    fn add(&self, feature: &Feature) -> Result<bool> {
        self.eval(
            ADD_SCRIPT,
            feature.key(),
            &[feature.name(), feature.description()],
        )?;
        Ok(true)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.eval(REMOVE_SCRIPT, key, &[])?;
        Ok(true)
    }

    fn features(&self) -> Result<Vec<String>> {
        let mut conn = self.connection()?;
        let mut keys: Vec<String> = conn
            .smembers(self.set_key())
            .map_err(|e| command_error("SMEMBERS", e))?;
        keys.sort();
        Ok(keys)
    }

    fn is_enabled(&self, key: &str) -> Result<bool> {
        match self.eval(IS_ENABLED_SCRIPT, key, &[])? {
            -1 => Err(FeatureGateError::not_found(key)),
            state => Ok(state == 1),
        }
    }

    fn enable(&self, key: &str) -> Result<bool> {
        self.set_enabled(key, true)
    }

    fn disable(&self, key: &str) -> Result<bool> {
        self.set_enabled(key, false)
    }
}
