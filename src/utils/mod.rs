pub mod ip;

pub use ip::{is_valid_ip, normalize_ip, parse_ip};
