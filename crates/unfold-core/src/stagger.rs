use std::time::Duration;

/// Per-index delays for cascading list reveals.
///
/// `delay(i) = lead + base * i`, exact Duration arithmetic, so consecutive
/// items differ by precisely `base` and the cascade is deterministic
/// top-to-bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    base: Duration,
    lead: Duration,
}

impl Stagger {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            lead: Duration::ZERO,
        }
    }

    /// Extra delay applied before the first item.
    pub fn with_lead(mut self, lead: Duration) -> Self {
        self.lead = lead;
        self
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn delay(&self, index: usize) -> Duration {
        self.lead + self.base * index as u32
    }

    pub fn delays(&self, count: usize) -> impl Iterator<Item = Duration> + '_ {
        (0..count).map(|i| self.delay(i))
    }
}
