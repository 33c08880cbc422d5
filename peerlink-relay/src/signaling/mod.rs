mod relay_service;
mod ws_handler;

pub use relay_service::{RelayOutcome, RelayService};
pub use ws_handler::{ws_handler, ws_room_handler};
