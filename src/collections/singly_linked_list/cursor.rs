use super::position::Position;
use super::SinglyLinkedList;

/// a read-only view of a [`SinglyLinkedList`] at a [`Position`], moving
/// forward one node at a time.
///
/// cursors are cheap to copy, and copies move independently of each other.
/// a cursor compares equal to any other cursor, of either flavor, that sits
/// on the same node.
pub struct Cursor<'a, T> {
    list: &'a SinglyLinkedList<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(list: &'a SinglyLinkedList<T>, position: Position) -> Self {
        Self { list, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// get the element under the cursor, or None on the sentinel or the end
    pub fn current(&self) -> Option<&'a T> {
        self.list.get(self.position)
    }

    /// get the element following the cursor without moving it. None at the
    /// end of the list, and also when the cursor's node was erased or belongs
    /// to another list.
    pub fn peek_next(&self) -> Option<&'a T> {
        if !self.list.contains_position(self.position) {
            return None;
        }
        self.list.get(self.list.advance(self.position))
    }

    /// move the cursor forward one node
    ///
    /// # Panics
    /// if the cursor is at the end of the list or its node was erased
    pub fn move_next(&mut self) {
        self.position = self.list.advance(self.position);
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("current", &self.current())
            .finish()
    }
}

/// a mutable view of a [`SinglyLinkedList`] at a [`Position`]. besides
/// walking forward it can edit the element under it and insert or erase the
/// node that follows it.
pub struct CursorMut<'a, T> {
    list: &'a mut SinglyLinkedList<T>,
    position: Position,
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(list: &'a mut SinglyLinkedList<T>, position: Position) -> Self {
        Self { list, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current(&self) -> Option<&T> {
        self.list.get(self.position)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.get_mut(self.position)
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.as_cursor().peek_next()
    }

    /// move the cursor forward one node
    ///
    /// # Panics
    /// if the cursor is at the end of the list or its node was erased
    pub fn move_next(&mut self) {
        self.position = self.list.advance(self.position);
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// insert `value` right after the cursor, which does not move. returns the
    /// position of the new node.
    ///
    /// # Panics
    /// if the cursor is at the end of the list or its node was erased
    pub fn insert_after(&mut self, value: T) -> Position {
        self.list.insert_after(self.position, value)
    }

    /// erase the node right after the cursor, which does not move. returns the
    /// position of the node that now follows the cursor.
    pub fn erase_after(&mut self) -> Position {
        self.list.erase_after(self.position)
    }

    /// reborrow as a read-only cursor at the same position
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.position)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.list, cursor.position)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position)
            .field("current", &self.current())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T> PartialEq<CursorMut<'_, T>> for Cursor<'_, T> {
    fn eq(&self, other: &CursorMut<'_, T>) -> bool {
        self.position == other.position
    }
}

impl<T> PartialEq<Cursor<'_, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &Cursor<'_, T>) -> bool {
        self.position == other.position
    }
}

impl<T> PartialEq<Position> for Cursor<'_, T> {
    fn eq(&self, other: &Position) -> bool {
        self.position == *other
    }
}

impl<T> PartialEq<Position> for CursorMut<'_, T> {
    fn eq(&self, other: &Position) -> bool {
        self.position == *other
    }
}
