//! One-shot command output (configure, reset-config, headless actions).

fn print_tagged(color: &str, tag: &str, title: &str, details: &str) {
    print!("\x1b[{}m[{}]\x1b[0m {}", color, tag, title);
    if !details.is_empty() {
        println!("\t {}", details);
    } else {
        println!();
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged("1;33", "INFO", title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged("1;91", "WARN", title, details);
}

/// Errors go to stderr so scripted callers can tell them apart.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("\x1b[1;31m[ERROR]\x1b[0m {}", title);
    if let Some(details) = details {
        eprintln!("\x1b[1;31m[ERROR]\x1b[0m Details: {}", details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged("1;32", "SUCCESS", title, details);
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
