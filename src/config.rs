use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

// --- Configuration ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and preview a directory tree from the browser", long_about = None)]
pub struct Args {
    /// Port to serve on
    #[arg(short, long, default_value_t = 9000)]
    pub port: u16,

    /// The directory of static files to host
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Interface address to listen on
    #[arg(short, long, value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Log every request (method, path, status, duration)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "axum_media_browser=debug,tower_http=debug"
        } else {
            "axum_media_browser=info,tower_http=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["axum-media-browser"]);
        assert_eq!(args.port, 9000);
        assert_eq!(args.dir, PathBuf::from("."));
        assert!(!args.verbose);
        assert_eq!(args.socket_addr(), "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn short_flags() {
        let args = Args::parse_from(["axum-media-browser", "-p", "8080", "-d", "/srv", "-v"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.dir, PathBuf::from("/srv"));
        assert!(args.verbose);
        assert!(args.log_filter().contains("debug"));
    }

    #[test]
    fn bind_address() {
        let args = Args::parse_from(["axum-media-browser", "--bind", "127.0.0.1", "--port", "3000"]);
        assert_eq!(args.socket_addr(), "127.0.0.1:3000".parse().unwrap());
    }
}
