//! 浏览器连接模块

pub mod connection;

pub use connection::connect_to_browser_and_page;
