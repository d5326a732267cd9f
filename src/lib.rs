pub mod app;
pub mod config;
pub mod controller;
pub mod models;
pub mod omdb;
pub mod render;
