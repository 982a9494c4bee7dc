//! Bit-flag utility
//!
//! Pure functions over `i64` values with two's-complement semantics. Bit
//! indices past 63 address the sign bit, which in two's complement extends
//! indefinitely; this keeps every function total over non-negative indices.
//!
//! Through the router: `bitwise.<op>.<value>.<index>` where `<op>` is
//! `set_bit`, `clear_bit` or `is_bit_set`.

use async_trait::async_trait;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::NS_BITWISE;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;

const MAX_SHIFT: u32 = i64::BITS - 1;

/// `value` with bit `index` set
pub fn set_bit(value: i64, index: u32) -> i64 {
    if index >= MAX_SHIFT {
        // Sign bit and everything above it
        return value | i64::MIN;
    }
    value | (1 << index)
}

/// `value` with bit `index` cleared
pub fn clear_bit(value: i64, index: u32) -> i64 {
    if index >= MAX_SHIFT {
        return value & i64::MAX;
    }
    value & !(1 << index)
}

/// Whether bit `index` of `value` is set
pub fn is_bit_set(value: i64, index: u32) -> bool {
    (value >> index.min(MAX_SHIFT)) & 1 == 1
}

/// Backend serving the `bitwise` namespace
#[derive(Debug, Default, Clone, Copy)]
pub struct BitwiseBackend;

fn parse_value(segment: &str) -> Result<i64> {
    segment
        .parse()
        .map_err(|_| Error::invalid_argument(segment, "expected a 64-bit integer"))
}

fn parse_index(segment: &str) -> Result<u32> {
    segment
        .parse()
        .map_err(|_| Error::invalid_argument(segment, "expected a non-negative bit index"))
}

#[async_trait]
impl CapabilityBackend for BitwiseBackend {
    fn namespace(&self) -> &str {
        NS_BITWISE
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let [op, value, index] = lookup.segments else {
            let at = lookup.segments.get(3).map(String::as_str).unwrap_or("");
            return Err(Error::invalid_argument(at, "expected <op>.<value>.<index>"));
        };
        let value = parse_value(value)?;
        let index = parse_index(index)?;

        match op.as_str() {
            "set_bit" => Ok(Value::from(set_bit(value, index))),
            "clear_bit" => Ok(Value::from(clear_bit(value, index))),
            "is_bit_set" => Ok(Value::from(is_bit_set(value, index))),
            other => Err(Error::not_found(
                other,
                "unknown bit operation (set_bit, clear_bit, is_bit_set)",
            )),
        }
    }
}

#[linkme::distributed_slice(BACKENDS)]
static BITWISE_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_BITWISE,
    description: "Pure set/clear/test bit helpers",
    factory: |_config| Ok(Box::new(BitwiseBackend)),
};
