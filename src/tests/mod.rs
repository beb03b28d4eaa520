mod config;
mod ip;
