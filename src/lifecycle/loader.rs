//! Reload gate for the resource list loader.
//!
//! At most one list fetch per scope is outstanding. Requests that arrive while
//! a fetch is in flight are absorbed; a request made on behalf of a completed
//! mutation is remembered and turned into exactly one follow-up fetch once the
//! current one settles, so the list always reflects the write.

/// Tracks the outstanding list fetch for one scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadGate {
    in_flight: bool,
    follow_up: bool,
    issued: u64,
    cycles: u64,
}

impl ReloadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a reload. Returns `true` when a fetch must be issued now.
    pub fn request(&mut self, after_mutation: bool) -> bool {
        if self.in_flight {
            if after_mutation {
                self.follow_up = true;
            }
            return false;
        }
        self.in_flight = true;
        self.issued += 1;
        true
    }

    /// Record that the outstanding fetch finished.
    ///
    /// Returns `true` when a queued follow-up fetch must be issued now; the
    /// gate then stays in flight.
    pub fn settle(&mut self) -> bool {
        if !self.in_flight {
            return false;
        }
        if self.follow_up {
            self.follow_up = false;
            self.issued += 1;
            return true;
        }
        self.in_flight = false;
        self.cycles += 1;
        false
    }

    /// True exactly while a fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn has_follow_up(&self) -> bool {
        self.follow_up
    }

    /// Number of fetches issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Number of completed loading periods (loading went true -> false)
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
