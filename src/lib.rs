pub mod app_service;
pub mod app_state;
pub mod collection_view;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod model;
pub mod query;
pub mod session;
pub mod storage;
pub mod ui;
