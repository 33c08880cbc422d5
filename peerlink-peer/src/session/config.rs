use crate::channel::DataChannel;
use crate::transport::CloseInfo;
use peerlink_core::{
    DEFAULT_KEEP_ALIVE_INTERVAL, DataChannelConfig, IdGenerator, MediaConstraints, RtcConfig,
    UuidGenerator,
};
use std::sync::Arc;
use std::time::Duration;

/// Invoked once with the channel when the session reaches `Connected`.
pub type ChannelReadyCallback = Box<dyn FnOnce(DataChannel) + Send + 'static>;

/// Invoked once when the relay connection ends on its own.
pub type SignalCloseCallback = Box<dyn FnOnce(Option<CloseInfo>) + Send + 'static>;

/// Everything a session needs at construction.
pub struct SessionConfig {
    pub room_id: String,
    pub ws_address: String,
    pub chan_ready_callback: ChannelReadyCallback,
    pub on_close_signal_message: Option<SignalCloseCallback>,
    /// Local id; generated when absent.
    pub id: Option<String>,
    pub caller: bool,
    /// Remote peer id; generated when absent.
    pub callee_id: Option<String>,
    pub rtc: RtcConfig,
    pub media: MediaConstraints,
    pub data_channel: DataChannelConfig,
    pub keep_alive_interval: Duration,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl SessionConfig {
    pub fn new<F>(room_id: impl Into<String>, ws_address: impl Into<String>, chan_ready: F) -> Self
    where
        F: FnOnce(DataChannel) + Send + 'static,
    {
        Self {
            room_id: room_id.into(),
            ws_address: ws_address.into(),
            chan_ready_callback: Box::new(chan_ready),
            on_close_signal_message: None,
            id: None,
            caller: false,
            callee_id: None,
            rtc: RtcConfig::default(),
            media: MediaConstraints::default(),
            data_channel: DataChannelConfig::default(),
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            id_generator: Arc::new(UuidGenerator),
        }
    }

    pub fn caller(mut self) -> Self {
        self.caller = true;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_callee_id(mut self, callee_id: impl Into<String>) -> Self {
        self.callee_id = Some(callee_id.into());
        self
    }

    pub fn with_rtc(mut self, rtc: RtcConfig) -> Self {
        self.rtc = rtc;
        self
    }

    pub fn with_media(mut self, media: MediaConstraints) -> Self {
        self.media = media;
        self
    }

    pub fn with_data_channel(mut self, data_channel: DataChannelConfig) -> Self {
        self.data_channel = data_channel;
        self
    }

    pub fn with_keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = ids;
        self
    }

    pub fn on_close_signal_message<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Option<CloseInfo>) + Send + 'static,
    {
        self.on_close_signal_message = Some(Box::new(callback));
        self
    }
}
