pub mod index;
pub mod notification;
pub mod service;
pub mod ticket;
