pub mod background;
pub mod export;
pub mod history;
pub mod images;
