//! Business logic layer between the menu and storage

pub mod tasks;
