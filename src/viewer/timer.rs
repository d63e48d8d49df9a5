// src/viewer/timer.rs

/// Identifies one arming of the idle timer. Only the latest ticket is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdleTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct IdleTimer {
    generation: u64,
    armed: bool,
}

impl IdleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) -> IdleTicket {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        IdleTicket(self.generation)
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.armed = false;
    }

    pub fn expire(&mut self, ticket: IdleTicket) -> bool {
        if self.armed && ticket.0 == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_expires() {
        let mut timer = IdleTimer::new();
        let first = timer.reset();
        let second = timer.reset();
        assert!(!timer.expire(first));
        assert!(timer.expire(second));
        assert!(!timer.expire(second));
    }

    #[test]
    fn test_cancel_invalidates() {
        let mut timer = IdleTimer::new();
        let ticket = timer.reset();
        timer.cancel();
        assert!(!timer.expire(ticket));
        let fresh = timer.reset();
        assert!(timer.expire(fresh));
    }
}
