// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Master-key material lives in these aliases so the bytes zeroize on drop.

pub use secure_gate::{fixed_alias, random_alias, SecureConversionsExt, SecureRandomExt};

fixed_alias!(VaultKey32, 32); // 256-bit master key
random_alias!(RandomVaultKey32, 32); // fresh CSPRNG key material
