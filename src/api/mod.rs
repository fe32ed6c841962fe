// API 数据传输对象模块

pub mod schema;
