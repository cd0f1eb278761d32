//! 数据加载器模块

pub mod settings_file;
