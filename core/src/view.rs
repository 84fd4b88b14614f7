#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageView {
    Grid,
    Constellation,
}

/// What the page shows for a given view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewPresentation {
    pub cards_visible: bool,
    pub constellation_visible: bool,
    pub grid_toggle_active: bool,
    pub constellation_toggle_active: bool,
    pub animating: bool,
}

impl PageView {
    pub fn presentation(self) -> ViewPresentation {
        let grid = self == PageView::Grid;
        ViewPresentation {
            cards_visible: grid,
            constellation_visible: !grid,
            grid_toggle_active: grid,
            constellation_toggle_active: !grid,
            animating: !grid,
        }
    }
}

/// Two-state view switch. No view is current until the catalog has loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewMachine {
    current: Option<PageView>,
}

impl ViewMachine {
    pub fn current(&self) -> Option<PageView> {
        self.current
    }

    pub fn is(&self, view: PageView) -> bool {
        self.current == Some(view)
    }

    /// Returns false when `view` is already current.
    pub fn enter(&mut self, view: PageView) -> bool {
        if self.current == Some(view) {
            return false;
        }
        self.current = Some(view);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_always_applies() {
        let mut machine = ViewMachine::default();
        assert_eq!(machine.current(), None);
        assert!(machine.enter(PageView::Constellation));
        assert!(machine.is(PageView::Constellation));
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut machine = ViewMachine::default();
        assert!(machine.enter(PageView::Grid));
        assert!(!machine.enter(PageView::Grid));
        assert!(machine.enter(PageView::Constellation));
        assert!(!machine.enter(PageView::Constellation));
    }

    #[test]
    fn presentations_are_mirror_images() {
        let grid = PageView::Grid.presentation();
        let sky = PageView::Constellation.presentation();
        assert!(grid.cards_visible && grid.grid_toggle_active && !grid.animating);
        assert!(!grid.constellation_visible && !grid.constellation_toggle_active);
        assert!(sky.constellation_visible && sky.constellation_toggle_active && sky.animating);
        assert!(!sky.cards_visible && !sky.grid_toggle_active);
    }
}
