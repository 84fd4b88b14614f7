/// Matches the CSS fade-out of `#landing-page`.
pub const LANDING_REMOVAL_DELAY_MS: u32 = 600;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandingState {
    #[default]
    Shown,
    Dismissed,
    Removed,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LandingGate {
    state: LandingState,
}

impl LandingGate {
    pub fn state(&self) -> LandingState {
        self.state
    }

    /// Accepted once; later activations are ignored.
    pub fn dismiss(&mut self) -> bool {
        if self.state != LandingState::Shown {
            return false;
        }
        self.state = LandingState::Dismissed;
        true
    }

    pub fn finish_removal(&mut self) -> bool {
        if self.state != LandingState::Dismissed {
            return false;
        }
        self.state = LandingState::Removed;
        true
    }
}
