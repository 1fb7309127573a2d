#![cfg(test)]

pub mod menu_tests;
