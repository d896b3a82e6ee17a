//! Pure state machines.
//!
//! A machine owns its state, receives events (facts about what happened)
//! and optionally decides on a command (intent for IO). `decide` is
//! synchronous and never performs IO; the controllers run the commands.

/// A state machine that interprets events and decides on commands.
pub trait Machine {
    /// The event type this machine handles.
    type Event;

    /// The command type this machine can emit.
    type Command;

    /// Process an event and optionally return a command.
    ///
    /// - Called serially, in the order events complete
    /// - At most one command per event
    /// - An event that is not valid in the current state leaves the state
    ///   untouched and returns `None`
    fn decide(&mut self, event: &Self::Event) -> Option<Self::Command>;
}
