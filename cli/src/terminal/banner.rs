use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
                ___ _ __ _ __  _ __ ___ | |__   ___
               / __| '__| '_ \| '__/ _ \| '_ \ / _ \
              | (__| |  | |_) | | | (_) | |_) |  __/
               \___|_|  | .__/|_|  \___/|_.__/ \___|
                        |_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_blue().bold()));
}
