/// Selection state for the booking list. The entries themselves always come
/// from the store's current snapshot, so only the cursor lives here.
#[derive(Default)]
pub(crate) struct HomeScreen {
    pub(crate) selected: usize,
}

impl HomeScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the cursor on a real row after the list shrank.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_selection_clamps() {
        let mut home = HomeScreen::default();
        home.move_selection(-1, 3);
        assert_eq!(home.selected, 0);
        home.move_selection(5, 3);
        assert_eq!(home.selected, 2);
        home.move_selection(1, 0);
        assert_eq!(home.selected, 2);
    }

    #[test]
    fn test_ensure_in_bounds_after_shrink() {
        let mut home = HomeScreen { selected: 4 };
        home.ensure_in_bounds(2);
        assert_eq!(home.selected, 1);
        home.ensure_in_bounds(0);
        assert_eq!(home.selected, 0);
    }
}
