// One navigable-list helper shared by every screen instead of a menu class
// hierarchy.
pub struct SelectList {
    items: &'static [&'static str],
    selected: usize,
}

impl SelectList {
    pub fn new(items: &'static [&'static str]) -> Self {
        SelectList { items, selected: 0 }
    }

    pub fn items(&self) -> &'static [&'static str] {
        self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> &'static str {
        self.items[self.selected]
    }

    pub fn previous(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut list = SelectList::new(&["a", "b", "c"]);
        list.previous();
        assert_eq!(list.selected_item(), "c");
        list.next();
        assert_eq!(list.selected_item(), "a");
        list.next();
        list.next();
        list.next();
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn reset_returns_to_the_top() {
        let mut list = SelectList::new(&["a", "b"]);
        list.next();
        list.reset();
        assert_eq!(list.selected_index(), 0);
    }
}
