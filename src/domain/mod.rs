pub mod category;
pub mod notification;
pub mod product;
pub mod selector;
