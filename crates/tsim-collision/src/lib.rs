//! `tsim-collision` — collision detection between agents and static objects.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`geometry`]   | `OrientedRect`, separating-axis test (`detect_intersection`)  |
//! | [`contact`]    | `calculate_point_of_contact`, `border_distance`, `ContactPoint` |
//! | [`detector`]   | `CollisionDetector` — the periodic all-pairs sweep            |
//! | [`event`]      | `CollisionEvent`, `EventNetwork`                              |
//! | [`prediction`] | `will_crash_during_brake`, `will_crash`                       |
//! | [`error`]      | `CollisionError`, `CollisionResult<T>`                        |
//!
//! # Pipeline per pair
//!
//! ```text
//! already partners? ──yes──▶ skip
//!        │no
//! broad phase (UpperLeft corner deltas vs. summed sizes) ──far──▶ skip
//!        │
//! SAT on 2 or 4 edge normals ──separated──▶ skip
//!        │overlap
//! point of contact (relative-velocity sweep) ──▶ CollisionEvent
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to events and contact points.  |

pub mod contact;
pub mod detector;
pub mod error;
pub mod event;
pub mod geometry;
pub mod prediction;


pub use contact::{border_distance, calculate_point_of_contact, ContactPoint};
pub use detector::CollisionDetector;
pub use error::{CollisionError, CollisionResult};
pub use event::{CollisionEvent, EventNetwork, EventType};
pub use geometry::{detect_intersection, Corner, OrientedRect, SatOutcome, ROTATION_EPS};
pub use prediction::{will_crash, will_crash_during_brake};
