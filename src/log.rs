//! Tagged, coloured status lines on stderr.

use ansi_term::Colour::{Green, Red, Yellow};

pub fn info(msg: &str) {
    eprintln!("{} {}", Green.bold().paint("INFO"), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", Yellow.bold().paint("WARN"), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", Red.bold().paint("ERROR"), msg);
}
