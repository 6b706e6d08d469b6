//! Background services

pub mod detection;
