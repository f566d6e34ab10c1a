//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one area of the Pinata API.
//!
//! | Module | Routes |
//! |--------|--------|
//! | `pinning` | `/pinning/*`, `/data/pinList` |
//! | `groups` | `/groups`, `/groups/{id}`, `/groups/{id}/cids` |
//! | `signatures` | `/v3/ipfs/signature/{cid}` |
//! | `swaps` | `/v3/ipfs/swap/{cid}` |
//! | `keys` | `/users/*ApiKey*`, `/v3/pinata/keys` |

pub mod groups;
pub mod keys;
pub mod pinning;
pub mod signatures;
pub mod swaps;

pub use groups::GroupsApi;
pub use keys::KeysApi;
pub use pinning::PinningApi;
pub use signatures::SignaturesApi;
pub use swaps::SwapsApi;
