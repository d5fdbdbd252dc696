// Click triggers - engine to audio-callback commands

/// Fire-and-forget request to sound one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTrigger {
    pub accented: bool,
}
