#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod catalog;
mod config;
mod launcher;
mod locale;
mod logging;
mod notify;
mod platform;
mod state;
mod supervisor;

#[cfg(test)]
mod test_support;

fn main() {
    logging::init();
    std::process::exit(launcher::main());
}
