// Messaging module - events and lock-free channels

pub mod channels;
pub mod command;
pub mod event;

pub use channels::{
    ClickConsumer, ClickProducer, EventConsumer, EventProducer, create_click_channel,
    create_event_channel,
};
pub use command::ClickTrigger;
pub use event::EngineEvent;
