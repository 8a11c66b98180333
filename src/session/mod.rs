//! Session registry subsystem.
//!
//! # Data Flow
//! ```text
//! open(endpoint, key, chain, slot, account)
//!     → SigningEngine::connect
//!     → Session (immutable identity + engine client)
//!     → SessionManager: slots[slot] = session, active = slot
//!
//! switch(slot)  → active = slot (slot must exist)
//! verify(slot)  → clone Session out of the lock
//!               → ApiKeyDirectory lookup (bounded by a timeout)
//!               → compare registered public key with the local one
//! ```
//!
//! # Invariants
//! - The active slot, when set, always names an entry in the map.
//! - Sessions are never mutated; re-opening a slot replaces the entry.
//! - No lock is held across the remote lookup.

pub mod manager;
pub mod types;

pub use manager::SessionManager;
pub use types::Session;
