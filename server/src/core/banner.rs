//! Startup banner and URL display

use super::config::{DatabaseBackend, is_all_interfaces};
use super::constants::APP_NAME;

/// Wrap `url` in an OSC 8 hyperlink when stdout supports it
fn terminal_link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{}\x07\x1b[36m{}\x1b[0m\x1b]8;;\x07", url, url)
    } else {
        format!("\x1b[36m{}\x1b[0m", url)
    }
}

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, backend: DatabaseBackend, data_dir: &str) {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    let base_url = format!("http://{}:{}", display_host, port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    const W: usize = 10;

    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "API:",
        terminal_link(&format!("{}/api/v1", base_url))
    );
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Docs:",
        terminal_link(&format!("{}/api/docs", base_url))
    );

    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    } else if is_all_interfaces(host) {
        if let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                let network_url = format!("http://{}:{}", ip, port);
                println!(
                    "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
                    "Network:",
                    terminal_link(&network_url)
                );
            }
        }
    }

    match backend {
        DatabaseBackend::Sqlite => {
            println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Data:", data_dir);
        }
        DatabaseBackend::Memory => {
            println!(
                "  \x1b[90m➜  {:<W$} in-memory (records are lost on exit)\x1b[0m",
                "Data:"
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_link_keeps_url() {
        let url = "http://localhost:5390/api/docs";
        let link = terminal_link(url);
        assert!(link.contains(url));
        assert!(link.ends_with("\x1b[0m") || link.ends_with("\x1b]8;;\x07"));
    }
}
