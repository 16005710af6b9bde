pub mod singly_linked_list;

pub use singly_linked_list::{
    Cursor, CursorMut, InsertError, IntoIter, Iter, IterMut, ListError, ListResult, Position,
    SinglyLinkedList,
};
