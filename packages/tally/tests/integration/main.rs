mod common;

mod settings;
mod users;
