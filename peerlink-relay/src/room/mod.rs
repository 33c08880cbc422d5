mod conn_id;
mod room_registry;

pub use conn_id::ConnId;
pub use room_registry::{ConnSender, RoomRegistry};
