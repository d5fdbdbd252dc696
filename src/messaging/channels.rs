// Lock-free communication channels

use crate::messaging::command::ClickTrigger;
use crate::messaging::event::EngineEvent;
use ringbuf::{HeapRb, traits::Split};

pub type EventProducer = ringbuf::HeapProd<EngineEvent>;
pub type EventConsumer = ringbuf::HeapCons<EngineEvent>;

pub fn create_event_channel(capacity: usize) -> (EventProducer, EventConsumer) {
    let rb = HeapRb::<EngineEvent>::new(capacity);
    rb.split()
}

pub type ClickProducer = ringbuf::HeapProd<ClickTrigger>;
pub type ClickConsumer = ringbuf::HeapCons<ClickTrigger>;

pub fn create_click_channel(capacity: usize) -> (ClickProducer, ClickConsumer) {
    let rb = HeapRb::<ClickTrigger>::new(capacity);
    rb.split()
}
