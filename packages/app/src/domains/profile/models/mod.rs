mod record;

pub use record::{ProfileRecord, RemoteProfile};
