//! Mount and request-generation tracking shared by the views.

/// Proof that a load was started; results carrying a stale ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Tracks whether the owning view is still mounted and which request is the
/// most recent one.
///
/// Starting a new load supersedes every older ticket, so rapid refreshes
/// resolve to the last request issued rather than the last one to finish.
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    generation: u64,
    mounted: bool,
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self {
            generation: 0,
            mounted: true,
        }
    }
}

impl ViewLifecycle {
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Whether a result for `ticket` may still be applied.
    pub const fn accepts(&self, ticket: LoadTicket) -> bool {
        self.mounted && ticket.0 == self.generation
    }

    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Release the view; every outstanding ticket goes stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }
}
