#![cfg_attr(all(feature = "no-std", not(test)), no_std)]

cfg_if::cfg_if! {
    if #[cfg(all(feature = "no-std", not(test)))] {
        extern crate alloc;
        pub(crate) use alloc::{collections::TryReserveError, vec::Vec};
    } else {
        pub(crate) use std::{collections::TryReserveError, vec::Vec};
    }
}

pub mod collections;
