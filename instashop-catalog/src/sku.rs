//! SKU generation.
//!
//! A SKU is the item name followed by a random suffix in `0..10000`. The
//! suffix is not checked for uniqueness; two items can end up with the
//! same SKU and downstream importers are expected to cope.

use rand::Rng;

/// Exclusive upper bound of the numeric SKU suffix.
pub const SKU_SUFFIX_RANGE: u32 = 10_000;

/// Generate a SKU using the thread-local RNG.
pub fn generate_sku(item_name: &str) -> String {
    generate_sku_with(item_name, &mut rand::thread_rng())
}

/// Generate a SKU from a caller-supplied RNG.
pub fn generate_sku_with<R: Rng + ?Sized>(item_name: &str, rng: &mut R) -> String {
    format!("{}-{}", item_name, rng.gen_range(0..SKU_SUFFIX_RANGE))
}
