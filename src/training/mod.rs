//! Clinical training layer — case content, the case state machine,
//! session orchestration, and the read-only HUD projection.

pub mod case;
pub mod content;
pub mod events;
pub mod hud;
pub mod session;
